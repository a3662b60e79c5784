use crate::constants::{MAX_MAX_WIDTH, MAX_PAGE_LINES, MIN_MAX_WIDTH, MIN_PAGE_LINES};

#[derive(Debug, Clone)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusTarget {
    Content,
    JumpInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    Normal,
    Help,
    ErrorPopup(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Loading { file_path: String },
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Wrap width; None follows the terminal width
    pub max_width: Option<usize>,
    /// Lines per page; None follows the terminal height
    pub page_lines: Option<usize>,
}

impl Config {
    /// Clamp values loaded from disk into their allowed ranges
    pub fn validated(mut self) -> Self {
        self.max_width = self.max_width.map(|w| w.clamp(MIN_MAX_WIDTH, MAX_MAX_WIDTH));
        self.page_lines = self
            .page_lines
            .map(|n| n.clamp(MIN_PAGE_LINES, MAX_PAGE_LINES));
        self
    }
}
