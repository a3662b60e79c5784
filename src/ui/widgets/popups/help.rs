use super::centered_popup;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

pub fn render_help_popup(f: &mut Frame) {
    let popup_area = centered_popup(f.area(), 60, 18);

    let help_text = vec![
        heading("PAGES"),
        Line::from(""),
        Line::from("  ←                  Previous page"),
        Line::from("  →                  Next page"),
        Line::from("  : / g / Tab        Jump to page"),
        Line::from(""),
        heading("JUMP BOX"),
        Line::from(""),
        Line::from("  Enter              Go to typed page"),
        Line::from("  Esc                Cancel"),
        Line::from(""),
        heading("APPLICATION"),
        Line::from(""),
        Line::from("  ? / F1             Toggle this help"),
        Line::from("  q / Ctrl-c         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}
