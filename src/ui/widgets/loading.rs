//! Loading spinner widget

use super::popups::centered_popup;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Instant;

/// Braille dots: ⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Milliseconds each spinner frame stays on screen
const SPINNER_FRAME_MS: u128 = 80;

fn spinner_frame(elapsed_ms: u128) -> &'static str {
    let idx = (elapsed_ms / SPINNER_FRAME_MS) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Loading indicator shown while a document is read
pub struct LoadingWidget {
    message: String,
    start_time: Instant,
}

impl LoadingWidget {
    pub fn new(message: impl Into<String>, start_time: Instant) -> Self {
        Self {
            message: message.into(),
            start_time,
        }
    }

    /// Render the loading widget as a centered popup
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let spinner = spinner_frame(self.start_time.elapsed().as_millis());

        let line = Line::from(vec![
            Span::styled(
                spinner,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(&self.message, Style::default().fg(Color::White)),
        ]);

        let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Loading ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        let area = centered_popup(area, 60, 3);
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}
