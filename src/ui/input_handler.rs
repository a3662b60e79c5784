use crate::app::AppState;
use crate::constants::MAX_JUMP_INPUT_LENGTH;
use crate::error::Result;
use crate::types::{FocusTarget, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.should_quit = true;
            return Ok(());
        }

        // Route input based on UI mode first
        match app.ui_mode {
            UiMode::Help => Self::handle_help(app, key),
            UiMode::ErrorPopup(_) => Self::handle_error_popup(app, key),
            UiMode::Normal => match app.focus {
                FocusTarget::JumpInput => Self::handle_jump_input(app, key),
                FocusTarget::Content => Self::handle_content(app, key),
            },
        }
    }

    fn handle_content(app: &mut AppState, key: KeyEvent) -> Result<()> {
        // Left/Right belong to the pagination binding
        match key.code {
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                app.toggle_help();
            }
            KeyCode::Tab | KeyCode::Char(':') | KeyCode::Char('g') => {
                app.focus_jump_input();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_jump_input(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                tracing::debug!("Jump cancelled by user");
                app.focus_content();
            }
            KeyCode::Tab => {
                app.cycle_focus();
            }
            KeyCode::Enter => {
                tracing::info!("Jump requested: '{}'", app.input_buffer);
                app.submit_jump();
            }
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                if app.input_buffer.chars().count() < MAX_JUMP_INPUT_LENGTH {
                    app.input_buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_error_popup(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.ui_mode = UiMode::Normal;
        }
        Ok(())
    }
}
