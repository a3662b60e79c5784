use crate::app::AppState;
use crate::types::{FocusTarget, LoadingState, UiMode};
use crate::ui::widgets::jump_input::render_jump_input;
use crate::ui::widgets::loading::LoadingWidget;
use crate::ui::widgets::popups::{error::render_error_popup, help::render_help_popup};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

pub fn render(f: &mut Frame, app: &AppState, started: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Titlebar
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Jump input
            Constraint::Length(1), // Statusbar
        ])
        .split(f.area());

    render_titlebar(f, app, chunks[0]);
    render_page(f, app, chunks[1]);
    render_jump_input(
        f,
        chunks[2],
        &app.input_buffer,
        app.focus == FocusTarget::JumpInput,
    );
    render_statusbar(f, app, chunks[3]);

    if let LoadingState::Loading { file_path } = &app.loading_state {
        let area = f.area();
        LoadingWidget::new(format!("Reading {}", file_path), started).render(f, area);
    }

    match &app.ui_mode {
        UiMode::Help => render_help_popup(f),
        UiMode::ErrorPopup(message) => render_error_popup(f, message),
        UiMode::Normal => {}
    }
}

fn render_titlebar(f: &mut Frame, app: &AppState, area: Rect) {
    let title_text = app
        .controller
        .as_ref()
        .map(|c| c.document().title.clone())
        .unwrap_or_else(|| "pagenav".to_string());

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_page(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(controller) = &app.controller else {
        let text = Paragraph::new("No document loaded")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(text, area);
        return;
    };

    let lines: Vec<Line> = controller
        .current_lines()
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
    f.render_widget(paragraph, area);
}

fn render_statusbar(f: &mut Frame, app: &AppState, area: Rect) {
    let status_text = match (&app.controller, &app.status_message) {
        (_, Some(message)) => message.clone(),
        (Some(controller), None) => format!(
            "Page {}/{} | ← → to turn | ? for help",
            controller.current_page(),
            controller.total_pages()
        ),
        (None, None) => "No document loaded".to_string(),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(status, area);
}
