//! "Add Column" panel: a name input plus one checkbox per known column

use crossterm::event::Event;
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::debug;
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::data::TableState;

pub struct ColumnPanel {
    input: Input,
    /// Every column label ever shown, in first-seen order
    catalog: Vec<String>,
    cursor: usize,
}

impl ColumnPanel {
    pub fn new(columns: &[String]) -> Self {
        let mut panel = Self {
            input: Input::default(),
            catalog: Vec::new(),
            cursor: 0,
        };
        panel.sync_catalog(columns);
        panel
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Record columns that appeared since the last sync
    pub fn sync_catalog(&mut self, columns: &[String]) {
        for col in columns {
            if !self.catalog.contains(col) {
                self.catalog.push(col.clone());
            }
        }
    }

    pub fn handle_input_event(&mut self, event: &Event) -> bool {
        self.input.handle_event(event).is_some()
    }

    /// Add the typed column. The input is cleared only when a column was added.
    pub fn commit(&mut self, state: &mut TableState) -> bool {
        if !state.add_column(self.input.value()) {
            return false;
        }
        self.input.reset();
        self.sync_catalog(state.columns());
        true
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.catalog.len() {
            self.cursor += 1;
        }
    }

    /// Flip visibility of the column under the cursor
    pub fn toggle_at_cursor(&mut self, state: &mut TableState) -> Option<bool> {
        let name = self.catalog.get(self.cursor)?.clone();
        self.toggle(&name, state)
    }

    pub fn toggle(&mut self, name: &str, state: &mut TableState) -> Option<bool> {
        if !self.catalog.iter().any(|c| c == name) {
            return None;
        }
        let checked = !state.has_column(name);
        state.toggle_column(name, checked);
        debug!(target: "input", "Checkbox '{}' -> {}", name, checked);
        Some(checked)
    }

    /// Lines the panel needs for `width` columns of screen
    pub fn height(&self, width: u16) -> u16 {
        let checkbox_width: usize = self.catalog.iter().map(|c| c.chars().count() + 6).sum();
        let inner = usize::from(width.saturating_sub(2).max(1));
        let lines = checkbox_width.div_ceil(inner).max(1) as u16;
        3 + lines + 2
    }

    /// Render the panel; returns where the text cursor goes when focused
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        state: &TableState,
        input_focused: bool,
        list_focused: bool,
    ) -> Option<Position> {
        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

        let input_style = if input_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let width = input_area.width.saturating_sub(2);
        let scroll = self.input.visual_scroll(usize::from(width));
        let input = Paragraph::new(self.input.value())
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Add Column [Enter: Add]")
                    .border_style(input_style),
            );
        f.render_widget(input, input_area);

        let spans: Vec<Span> = self
            .catalog
            .iter()
            .enumerate()
            .flat_map(|(i, col)| {
                let mark = if state.has_column(col) { "[x]" } else { "[ ]" };
                let mut style = Style::default();
                if list_focused && i == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [
                    Span::styled(format!("{} {}", mark, col), style),
                    Span::raw("  "),
                ]
            })
            .collect();
        let list_style = if list_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Columns [Space: Show/Hide]")
                    .border_style(list_style),
            );
        f.render_widget(list, list_area);

        input_focused.then(|| {
            let cursor = self.input.visual_cursor().saturating_sub(scroll);
            Position::new(input_area.x + 1 + cursor as u16, input_area.y + 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_clears_only_on_success() {
        let mut state = TableState::seeded();
        let mut panel = ColumnPanel::new(state.columns());

        panel.set_value("   ");
        assert!(!panel.commit(&mut state));
        assert_eq!(panel.value(), "   ");

        panel.set_value("  Notes ");
        assert!(panel.commit(&mut state));
        assert_eq!(panel.value(), "");
        assert_eq!(state.columns().last().map(String::as_str), Some("Notes"));
        assert_eq!(panel.catalog().len(), 5);
    }

    #[test]
    fn test_unchecked_column_stays_in_catalog() {
        let mut state = TableState::seeded();
        let mut panel = ColumnPanel::new(state.columns());

        assert_eq!(panel.toggle("Last Name", &mut state), Some(false));
        assert!(!state.has_column("Last Name"));
        assert_eq!(panel.catalog().len(), 4);

        assert_eq!(panel.toggle("Last Name", &mut state), Some(true));
        assert_eq!(state.columns().last().map(String::as_str), Some("Last Name"));
    }

    #[test]
    fn test_cursor_bounds() {
        let state = TableState::seeded();
        let mut panel = ColumnPanel::new(state.columns());
        panel.cursor_up();
        assert_eq!(panel.cursor(), 0);
        for _ in 0..10 {
            panel.cursor_down();
        }
        assert_eq!(panel.cursor(), 3);
    }
}
