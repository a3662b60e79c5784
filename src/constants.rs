//! Application-wide constants

/// Minimum terminal width required to run the application
pub const MIN_TERMINAL_WIDTH: u16 = 40;

/// Minimum terminal height required to run the application
pub const MIN_TERMINAL_HEIGHT: u16 = 10;

/// Maximum length for the jump-to-page input buffer (characters)
pub const MAX_JUMP_INPUT_LENGTH: usize = 10;

/// Minimum allowed value for max_width
pub const MIN_MAX_WIDTH: usize = 20;

/// Maximum allowed value for max_width
pub const MAX_MAX_WIDTH: usize = 200;

/// Minimum allowed value for page_lines
pub const MIN_PAGE_LINES: usize = 1;

/// Maximum allowed value for page_lines
pub const MAX_PAGE_LINES: usize = 500;

/// Rows taken by titlebar, statusbar and jump input
pub const UI_CHROME_HEIGHT: u16 = 5;

/// Reserved columns for margins
pub const UI_MARGIN_WIDTH: usize = 4;

/// Frame duration in milliseconds for the UI render loop (targeting 60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Debounce timeout for terminal resize events in milliseconds
pub const RESIZE_DEBOUNCE_MS: u64 = 200;
