//! Per-row component: static or editable rendering, the edit draft, and the
//! drop-target side of drag-to-reorder.

use crossterm::event::Event;
use tracing::{debug, info};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::data::{to_camel_case, CellValue, RowRecord, TableState};
use crate::ui::drag::{decide_hover, DragItem, HoverDecision, RowBounds};

/// Uncommitted cell edits, keyed by column label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    cells: Vec<(String, CellValue)>,
}

impl Draft {
    /// Snapshot the values a row currently shows for `columns`
    pub fn from_row(row: &RowRecord, columns: &[String]) -> Self {
        let cells = columns
            .iter()
            .map(|col| (col.clone(), initial_value(row, col)))
            .collect();
        Self { cells }
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn set(&mut self, label: &str, value: CellValue) {
        match self.cells.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((label.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(l, v)| (l.as_str(), v))
    }
}

/// Value a draft starts from: the label itself as a key, then the
/// camel-cased key, then empty.
fn initial_value(row: &RowRecord, label: &str) -> CellValue {
    row.value(label)
        .or_else(|| row.value(&to_camel_case(label)))
        .unwrap_or_default()
}

/// One rendered row. Lives as long as its row and follows it on reorder.
#[derive(Debug, Default)]
pub struct RowView {
    index: usize,
    draft: Option<Draft>,
    focused_col: usize,
    editor: Input,
}

impl RowView {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn focused_col(&self) -> usize {
        self.focused_col
    }

    pub fn editor(&self) -> &Input {
        &self.editor
    }

    /// Make sure a row already in edit mode has a draft to edit
    pub fn sync(&mut self, state: &TableState) {
        let Some(row) = state.row(self.index) else {
            self.draft = None;
            return;
        };
        if row.editing && self.draft.is_none() {
            self.draft = Some(Draft::from_row(row, state.columns()));
            self.focus_cell(0, state.columns());
        } else if !row.editing {
            self.draft = None;
        }
        let last = state.columns().len().saturating_sub(1);
        if self.focused_col > last {
            self.focus_cell(last, state.columns());
        }
    }

    /// Put the row in edit mode with a fresh draft
    pub fn begin_edit(&mut self, state: &mut TableState) -> bool {
        let Some(row) = state.row(self.index) else {
            return false;
        };
        if row.editing {
            return false;
        }
        self.draft = Some(Draft::from_row(row, state.columns()));
        state.set_editing(self.index, true);
        self.focus_cell(0, state.columns());
        info!(target: "row", "Row {} entered edit mode", self.index);
        true
    }

    /// Change one draft cell. Nothing is shared until [`RowView::save`].
    pub fn edit_field(&mut self, label: &str, value: impl Into<CellValue>) {
        let value = value.into();
        if let Some(draft) = self.draft.as_mut() {
            draft.set(label, value);
        }
    }

    /// Merge the draft into the shared row and leave edit mode
    pub fn save(&mut self, state: &mut TableState) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        let saved = state.update_row(self.index, |row| {
            for (label, value) in draft.iter() {
                row.set(to_camel_case(label), value.clone());
            }
            row.editing = false;
        });
        if saved {
            info!(target: "row", "Row {} saved", self.index);
        }
        saved
    }

    /// Drop the draft and leave edit mode. The next edit starts again from
    /// the shared row.
    pub fn cancel(&mut self, state: &mut TableState) -> bool {
        let cancelled = state.set_editing(self.index, false);
        self.draft = None;
        if cancelled {
            info!(target: "row", "Row {} edit cancelled", self.index);
        }
        cancelled
    }

    /// Text shown in each column, in column order
    pub fn cell_texts(&self, row: &RowRecord, columns: &[String], placeholder: &str) -> Vec<String> {
        match (&self.draft, row.editing) {
            (Some(draft), true) => columns
                .iter()
                .map(|col| {
                    draft
                        .get(col)
                        .cloned()
                        .unwrap_or_else(|| initial_value(row, col))
                        .to_string()
                })
                .collect(),
            _ => columns
                .iter()
                .map(|col| row.display(&to_camel_case(col), placeholder))
                .collect(),
        }
    }

    /// Move the text cursor to column `col` of the draft
    pub fn focus_cell(&mut self, col: usize, columns: &[String]) {
        self.focused_col = col;
        let value = columns
            .get(col)
            .and_then(|label| self.draft.as_ref().and_then(|d| d.get(label)))
            .map(|v| v.to_string())
            .unwrap_or_default();
        self.editor = Input::new(value);
    }

    pub fn next_cell(&mut self, columns: &[String]) {
        if columns.is_empty() {
            return;
        }
        let next = (self.focused_col + 1) % columns.len();
        self.focus_cell(next, columns);
    }

    pub fn prev_cell(&mut self, columns: &[String]) {
        if columns.is_empty() {
            return;
        }
        let prev = (self.focused_col + columns.len() - 1) % columns.len();
        self.focus_cell(prev, columns);
    }

    /// Feed a terminal event to the focused cell's text input
    pub fn handle_editor_event(&mut self, event: &Event, columns: &[String]) -> bool {
        if self.draft.is_none() {
            return false;
        }
        let Some(label) = columns.get(self.focused_col) else {
            return false;
        };
        match self.editor.handle_event(event) {
            Some(changed) => {
                if changed.value {
                    let value = self.editor.value().to_string();
                    self.edit_field(label, value);
                }
                true
            }
            None => false,
        }
    }

    /// React to the dragged row hovering over this row
    pub fn hover(
        &self,
        dragged: &mut DragItem,
        bounds: RowBounds,
        pointer_y: Option<f32>,
        state: &mut TableState,
    ) -> Option<(usize, usize)> {
        match decide_hover(dragged.index, self.index, bounds, pointer_y) {
            HoverDecision::Move { from, to } => {
                if !state.move_row(from, to) {
                    return None;
                }
                dragged.index = to;
                debug!(target: "drag", "Hover moved row {} -> {}", from, to);
                Some((from, to))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TableState {
        TableState::seeded()
    }

    #[test]
    fn test_draft_snapshot_uses_camel_case_key() {
        let state = state();
        let draft = Draft::from_row(&state.rows()[1], state.columns());
        assert_eq!(draft.get("First Name"), Some(&CellValue::text("Maryna")));
        assert_eq!(draft.get("Email"), Some(&CellValue::text("maryna@gmail.com")));
    }

    #[test]
    fn test_draft_for_missing_column_is_empty() {
        let mut state = state();
        state.add_column("Notes");
        let draft = Draft::from_row(&state.rows()[2], state.columns());
        assert_eq!(draft.get("Notes"), Some(&CellValue::default()));
    }

    #[test]
    fn test_edit_field_without_draft_is_ignored() {
        let mut view = RowView::new(1);
        view.edit_field("Email", "x");
        assert!(view.draft().is_none());
    }

    #[test]
    fn test_sync_creates_draft_for_initially_editing_row() {
        let state = state();
        let mut view = RowView::new(0);
        view.sync(&state);
        assert!(view.draft().is_some());
        assert_eq!(view.editor().value(), "Yaroslav");
    }

    #[test]
    fn test_cell_navigation_wraps() {
        let mut state = state();
        let mut view = RowView::new(2);
        view.begin_edit(&mut state);
        view.prev_cell(state.columns());
        assert_eq!(view.focused_col(), 3);
        assert_eq!(view.editor().value(), "max@gmail.com");
        view.next_cell(state.columns());
        assert_eq!(view.focused_col(), 0);
    }

    #[test]
    fn test_begin_edit_twice_is_noop() {
        let mut state = state();
        let mut view = RowView::new(1);
        assert!(view.begin_edit(&mut state));
        assert!(!view.begin_edit(&mut state));
    }
}
