use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::utils::logging::{LogEntry, LogRingBuffer};

/// Overlay with the most recent log lines from the in-memory buffer
pub struct LogWidget<'a> {
    buffer: Option<&'a LogRingBuffer>,
}

impl<'a> LogWidget<'a> {
    pub fn new(buffer: Option<&'a LogRingBuffer>) -> Self {
        Self { buffer }
    }

    fn level_style(entry: &LogEntry) -> Style {
        match entry.level.as_str() {
            "ERROR" => Style::default().fg(Color::Red),
            "WARN" => Style::default().fg(Color::Yellow),
            "INFO" => Style::default().fg(Color::Green),
            "DEBUG" => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = Rect {
            x: area.x + area.width / 10,
            y: area.y + area.height / 10,
            width: area.width - area.width / 5,
            height: area.height - area.height / 5,
        };
        let visible = usize::from(popup.height.saturating_sub(2));

        let lines: Vec<Line> = match self.buffer {
            Some(buffer) => buffer
                .get_recent(visible)
                .into_iter()
                .map(|entry| {
                    Line::from(vec![
                        Span::styled(
                            format!("{} {:<5} ", entry.timestamp, entry.level),
                            Self::level_style(&entry),
                        ),
                        Span::styled(
                            format!("[{}] ", entry.target),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(entry.message),
                    ])
                })
                .collect(),
            None => vec![Line::from("Logging is not initialized")],
        };

        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Log [F5 to close]"),
            ),
            popup,
        );
    }
}
