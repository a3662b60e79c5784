use crate::binding::KeyboardPaginationBinding;
use crate::constants::{UI_CHROME_HEIGHT, UI_MARGIN_WIDTH};
use crate::controller::PageController;
use crate::document::Document;
use crate::element::Element;
use crate::intent::Intent;
use crate::surface::{InputSurface, KeyInput, TargetKind};
use crate::types::{Config, FocusTarget, LoadingState, UiMode, Viewport};
use crossterm::event::KeyEvent;
use std::path::Path;
use tokio::sync::mpsc;

pub struct AppState {
    pub viewport: Viewport,
    pub focus: FocusTarget,
    pub config: Config,
    pub should_quit: bool,

    // CLI overrides (not persisted)
    pub cli_max_width_override: Option<usize>,
    pub cli_page_lines_override: Option<usize>,
    pub start_page: usize,

    // UI Mode
    pub ui_mode: UiMode,
    pub loading_state: LoadingState,
    pub input_buffer: String,
    pub status_message: Option<String>,

    // Elements keys can be aimed at
    pub jump_input: Element,

    // Pagination
    pub surface: InputSurface,
    pub controller: Option<PageController>,
    binding: Option<KeyboardPaginationBinding>,
    intent_tx: mpsc::UnboundedSender<Intent>,
}

impl AppState {
    pub fn new(config: Config, intent_tx: mpsc::UnboundedSender<Intent>) -> Self {
        AppState {
            viewport: Viewport {
                width: 80,
                height: 24,
            },
            focus: FocusTarget::Content,
            config,
            should_quit: false,
            cli_max_width_override: None,
            cli_page_lines_override: None,
            start_page: 1,
            ui_mode: UiMode::Normal,
            loading_state: LoadingState::Idle,
            input_buffer: String::new(),
            status_message: None,
            jump_input: Element::new(TargetKind::TextInput),
            surface: InputSurface::new(),
            controller: None,
            binding: None,
            intent_tx,
        }
    }

    pub fn update_viewport_size(&mut self, width: u16, height: u16) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Wrap width: CLI override, then config, capped by the terminal
    pub fn effective_width(&self) -> usize {
        let available = (self.viewport.width as usize)
            .saturating_sub(UI_MARGIN_WIDTH)
            .max(1);
        self.cli_max_width_override
            .or(self.config.max_width)
            .map_or(available, |w| w.min(available))
    }

    /// Lines per page: CLI override, then config, then whatever fits on screen
    pub fn effective_page_lines(&self) -> usize {
        self.cli_page_lines_override
            .or(self.config.page_lines)
            .unwrap_or_else(|| {
                (self.viewport.height.saturating_sub(UI_CHROME_HEIGHT) as usize).max(1)
            })
    }

    /// Replace the current document and mount the pagination binding on it
    pub fn load_document(&mut self, text: String, file_path: &str) {
        self.unmount();

        let title = Path::new(file_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());
        let document = Document::from_text(
            title,
            text,
            self.effective_width(),
            self.effective_page_lines(),
        );
        tracing::info!(
            "Document '{}' loaded: {} pages",
            document.title,
            document.total_pages()
        );

        let element = Element::new(TargetKind::Other);
        self.controller = Some(PageController::new(document, element, self.start_page));
        self.loading_state = LoadingState::Idle;
        self.mount();
    }

    /// Attach the binding to the page element. Does nothing without a document
    /// or when already mounted.
    pub fn mount(&mut self) {
        if self.binding.is_some() {
            return;
        }
        if let Some(controller) = &self.controller {
            self.binding = Some(KeyboardPaginationBinding::activate(
                &self.surface,
                controller.element().clone(),
                self.intent_tx.clone(),
            ));
        }
    }

    /// Detach the binding before the page element goes away
    pub fn unmount(&mut self) {
        if let Some(mut binding) = self.binding.take() {
            binding.deactivate();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }

    /// Kind of the element that currently has focus
    pub fn focused_target(&self) -> TargetKind {
        match self.focus {
            FocusTarget::JumpInput => self.jump_input.kind(),
            FocusTarget::Content => self
                .controller
                .as_ref()
                .map_or(TargetKind::Other, |c| c.element().kind()),
        }
    }

    /// Send a key press to every listener on the input surface, aimed at the
    /// focused element.
    pub fn dispatch_key(&self, key: KeyEvent) -> usize {
        self.surface
            .dispatch(&KeyInput::new(key, self.focused_target()))
    }

    pub fn apply_intent(&mut self, intent: Intent) {
        let Some(controller) = &mut self.controller else {
            tracing::warn!("Intent {:?} arrived with no document loaded", intent);
            return;
        };
        match controller.handle_intent(intent) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                tracing::warn!("Rejected {:?}: {}", intent, e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn handle_resize_complete(&mut self, width: u16, height: u16) {
        self.update_viewport_size(width, height);
        let (cols, lines) = (self.effective_width(), self.effective_page_lines());
        if let Some(controller) = &mut self.controller {
            controller.repaginate(cols, lines);
        }
        if let Some(binding) = &self.binding {
            binding.updated();
        }
    }

    pub fn submit_jump(&mut self) {
        let raw = std::mem::take(&mut self.input_buffer);
        self.focus = FocusTarget::Content;
        if raw.trim().is_empty() {
            return;
        }
        let Some(controller) = &mut self.controller else {
            return;
        };
        if let Err(e) = controller.jump_to(&raw) {
            tracing::warn!("Jump failed: {}", e);
            self.ui_mode = UiMode::ErrorPopup(e.to_string());
        }
    }

    pub fn toggle_help(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Help => UiMode::Normal,
            _ => UiMode::Help,
        };
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Content => FocusTarget::JumpInput,
            FocusTarget::JumpInput => FocusTarget::Content,
        };
    }

    pub fn focus_jump_input(&mut self) {
        self.focus = FocusTarget::JumpInput;
    }

    pub fn focus_content(&mut self) {
        self.focus = FocusTarget::Content;
        self.input_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn create_app() -> (AppState, mpsc::UnboundedReceiver<Intent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(Config::default(), tx);
        app.cli_page_lines_override = Some(1);
        let text = (1..=5).map(|n| format!("line {}", n)).collect::<Vec<_>>().join("\n");
        app.start_page = 3;
        app.load_document(text, "/tmp/five.txt");
        (app, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pump(app: &mut AppState, rx: &mut mpsc::UnboundedReceiver<Intent>) {
        while let Ok(intent) = rx.try_recv() {
            app.apply_intent(intent);
        }
    }

    fn page(app: &AppState) -> usize {
        app.controller.as_ref().unwrap().current_page()
    }

    #[test]
    fn test_arrow_keys_page_through_document() {
        let (mut app, mut rx) = create_app();
        assert!(app.is_mounted());
        assert_eq!(page(&app), 3);

        app.dispatch_key(key(KeyCode::Right));
        pump(&mut app, &mut rx);
        assert_eq!(page(&app), 4);

        app.dispatch_key(key(KeyCode::Right));
        pump(&mut app, &mut rx);
        app.dispatch_key(key(KeyCode::Right));
        pump(&mut app, &mut rx);
        assert_eq!(page(&app), 5);

        for _ in 0..10 {
            app.dispatch_key(key(KeyCode::Left));
            pump(&mut app, &mut rx);
        }
        assert_eq!(page(&app), 1);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_arrow_keys_in_jump_box_do_not_paginate() {
        let (mut app, mut rx) = create_app();
        app.focus_jump_input();

        app.dispatch_key(key(KeyCode::Right));
        assert!(rx.try_recv().is_err());
        assert_eq!(page(&app), 3);
    }

    #[test]
    fn test_focused_target_follows_element_kind() {
        let (mut app, _rx) = create_app();
        assert_eq!(app.focused_target(), TargetKind::Other);

        app.focus_jump_input();
        assert_eq!(app.focused_target(), TargetKind::TextInput);
        assert!(
            KeyInput::new(key(KeyCode::Right), app.focused_target()).is_text_entry()
        );
    }

    #[test]
    fn test_unmount_detaches_listener() {
        let (mut app, mut rx) = create_app();
        app.unmount();
        assert!(!app.is_mounted());
        assert_eq!(app.surface.listener_count(), 0);

        assert_eq!(app.dispatch_key(key(KeyCode::Right)), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reload_keeps_single_listener() {
        let (mut app, _rx) = create_app();
        app.load_document("again".to_string(), "other.txt");
        assert_eq!(app.surface.listener_count(), 1);
        assert_eq!(app.controller.as_ref().unwrap().document().title, "other.txt");
    }

    #[test]
    fn test_submit_jump() {
        let (mut app, _rx) = create_app();
        app.focus_jump_input();
        app.input_buffer = "5".to_string();
        app.submit_jump();
        assert_eq!(page(&app), 5);
        assert_eq!(app.focus, FocusTarget::Content);

        app.input_buffer = "42".to_string();
        app.submit_jump();
        assert!(matches!(app.ui_mode, UiMode::ErrorPopup(_)));
        assert_eq!(page(&app), 5);
    }

    #[test]
    fn test_resize_repaginates_without_rebinding() {
        let (mut app, mut rx) = create_app();
        app.cli_page_lines_override = Some(10);
        app.handle_resize_complete(100, 40);
        assert_eq!(app.controller.as_ref().unwrap().total_pages(), 1);
        assert_eq!(app.surface.listener_count(), 1);

        app.dispatch_key(key(KeyCode::Right));
        assert!(rx.try_recv().is_err());
    }
}
