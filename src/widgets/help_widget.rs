use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("↑/↓  j/k", "Select row"),
            ("Shift+↑/↓  J/K", "Move selected row"),
            ("e / Enter", "Edit selected row"),
            ("a", "Show/hide Add Row panel"),
            ("c", "Show/hide Add Column panel"),
            ("Tab", "Focus next panel"),
            ("Mouse drag", "Drag a row to reorder"),
            ("q", "Quit"),
        ],
    ),
    (
        "Editing a row",
        &[
            ("Tab / Shift+Tab", "Next / previous cell"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
            ("Alt+A / Alt+C", "Show/hide Add Row / Add Column"),
        ],
    ),
    (
        "Add Column panel",
        &[
            ("Enter", "Add typed column"),
            ("↓", "Go to column checkboxes"),
            ("Space", "Show/hide column"),
        ],
    ),
    (
        "Add Row panel",
        &[
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Add row"),
            ("Ctrl+D", "Delete last row"),
        ],
    ),
    (
        "Anywhere",
        &[("F1", "Toggle help"), ("F5", "Toggle log"), ("Ctrl+C", "Quit")],
    ),
];

/// Centered overlay listing the key bindings
pub struct HelpWidget;

impl HelpWidget {
    pub fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                *title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, what) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<18}", keys), Style::default().fg(Color::Cyan)),
                    Span::raw(*what),
                ]));
            }
            lines.push(Line::default());
        }
        lines
    }

    pub fn render(f: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = centered(area, 52, height);

        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help [F1 to close]"),
            ),
            popup,
        );
    }
}

/// A `width` x `height` rectangle centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered(Rect::new(0, 0, 100, 40), 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_every_section_listed() {
        let text: Vec<String> = HelpWidget::lines().iter().map(|l| l.to_string()).collect();
        for (title, _) in SECTIONS {
            assert!(text.iter().any(|l| l == title));
        }
    }
}
