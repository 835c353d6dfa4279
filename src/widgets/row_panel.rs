//! "Add Row" panel: one input per visible column, plus Add and Delete

use crossterm::event::Event;
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::data::{KeyStyle, RowRecord, TableState};

pub struct RowPanel {
    /// Typed values by storage key, in the order they were first typed
    draft: Vec<(String, String)>,
    focused: usize,
    editor: Input,
    key_style: KeyStyle,
}

impl RowPanel {
    pub fn new(key_style: KeyStyle) -> Self {
        Self {
            draft: Vec::new(),
            focused: 0,
            editor: Input::default(),
            key_style,
        }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Current value of the field for `label`
    pub fn field_value(&self, label: &str) -> &str {
        let key = self.key_style.derive(label);
        self.draft
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Set the field for `label`, as if typed
    pub fn set_field(&mut self, label: &str, value: &str) {
        let key = self.key_style.derive(label);
        match self.draft.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.draft.push((key, value.to_string())),
        }
    }

    pub fn focus_field(&mut self, index: usize, columns: &[String]) {
        self.focused = index.min(columns.len().saturating_sub(1));
        let value = columns
            .get(self.focused)
            .map(|label| self.field_value(label).to_string())
            .unwrap_or_default();
        self.editor = Input::new(value);
    }

    pub fn next_field(&mut self, columns: &[String]) {
        if !columns.is_empty() {
            self.focus_field((self.focused + 1) % columns.len(), columns);
        }
    }

    pub fn prev_field(&mut self, columns: &[String]) {
        if !columns.is_empty() {
            self.focus_field((self.focused + columns.len() - 1) % columns.len(), columns);
        }
    }

    pub fn handle_input_event(&mut self, event: &Event, columns: &[String]) -> bool {
        let Some(label) = columns.get(self.focused) else {
            return false;
        };
        match self.editor.handle_event(event) {
            Some(changed) => {
                if changed.value {
                    let value = self.editor.value().to_string();
                    self.set_field(label, &value);
                }
                true
            }
            None => false,
        }
    }

    /// Append a row from the typed fields and clear the form.
    /// Fields never typed into are absent from the new row.
    pub fn commit(&mut self, state: &mut TableState) {
        let record = std::mem::take(&mut self.draft)
            .into_iter()
            .fold(RowRecord::new(), |row, (key, value)| row.with_cell(key, value));
        state.add_row(record);
        self.editor.reset();
    }

    /// Remove the last row of the table
    pub fn delete_last(&mut self, state: &mut TableState) -> Option<RowRecord> {
        state.delete_last_row()
    }

    pub fn height(&self) -> u16 {
        4
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        columns: &[String],
        focused: bool,
    ) -> Option<Position> {
        let [fields_area, help_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        if columns.is_empty() {
            f.render_widget(
                Paragraph::new("No columns to fill in").style(Style::default().fg(Color::DarkGray)),
                fields_area,
            );
        }

        let field_areas = Layout::horizontal(vec![Constraint::Fill(1); columns.len()])
            .spacing(1)
            .split(fields_area);

        let mut cursor = None;
        for (i, (label, field_area)) in columns.iter().zip(field_areas.iter()).enumerate() {
            let is_focused = focused && i == self.focused;
            let border_style = if is_focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let width = usize::from(field_area.width.saturating_sub(2));
            let (text, scroll) = if is_focused {
                (self.editor.value(), self.editor.visual_scroll(width))
            } else {
                (self.field_value(label), 0)
            };
            let field = Paragraph::new(text).scroll((0, scroll as u16)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label.as_str())
                    .border_style(border_style),
            );
            f.render_widget(field, *field_area);

            if is_focused {
                let x = self.editor.visual_cursor().saturating_sub(scroll);
                cursor = Some(Position::new(field_area.x + 1 + x as u16, field_area.y + 1));
            }
        }

        let help = Paragraph::new("Enter: Add | Ctrl+D: Delete last row | Tab: Next field | Esc: Back")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, help_area);

        cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;

    #[test]
    fn test_commit_writes_only_typed_fields() {
        let mut state = TableState::seeded();
        let columns = state.columns().to_vec();
        let mut panel = RowPanel::new(KeyStyle::Compact);

        panel.set_field("First Name", "Ada");
        panel.set_field("Email", "ada@example.com");
        panel.commit(&mut state);

        let row = state.rows().last().unwrap();
        assert_eq!(row.get("firstName"), Some(&CellValue::text("Ada")));
        assert_eq!(row.get("email"), Some(&CellValue::text("ada@example.com")));
        assert!(row.get("lastName").is_none());
        assert!(!row.editing);
        assert_eq!(panel.field_value(&columns[0]), "");
    }

    #[test]
    fn test_compact_keys_for_lower_case_labels() {
        let mut state = TableState::new(vec!["zip code".to_string()], Vec::new());
        let mut panel = RowPanel::new(KeyStyle::Compact);
        panel.set_field("zip code", "12345");
        panel.commit(&mut state);
        assert!(state.rows()[0].get("zipcode").is_some());

        let mut panel = RowPanel::new(KeyStyle::CamelCase);
        panel.set_field("zip code", "12345");
        panel.commit(&mut state);
        assert!(state.rows()[1].get("zipCode").is_some());
    }

    #[test]
    fn test_delete_on_empty_table() {
        let mut state = TableState::default();
        let mut panel = RowPanel::new(KeyStyle::Compact);
        assert!(panel.delete_last(&mut state).is_none());
        assert_eq!(state.row_count(), 0);
    }
}
