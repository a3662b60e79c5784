use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Render the jump-to-page text box
pub fn render_jump_input(frame: &mut Frame, area: Rect, input: &str, focused: bool) {
    let block = Block::default()
        .title(" Go to page ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Ghost text when empty
    let paragraph = if input.is_empty() {
        let hint = if focused {
            "Type a page number and press Enter"
        } else {
            "Press : to jump"
        };
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(paragraph, inner);

    if focused {
        let cursor_x = inner.x + (input.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
