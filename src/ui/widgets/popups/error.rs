use super::centered_popup;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_error_popup(f: &mut Frame, message: &str) {
    // Enough for title, message, and OK button
    let popup_area = centered_popup(f.area(), 40, 7);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner_area = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button
        ])
        .split(inner_area);

    let error_text = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(error_text, chunks[0]);

    let button = Paragraph::new(Line::from(vec![Span::styled(
        "[OK]",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center);
    f.render_widget(button, chunks[2]);
}
