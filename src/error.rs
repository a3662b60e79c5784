use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid UTF-8 in document: {0}")]
    Utf8Error(String),

    #[error("Page {page} is out of range (1-{total})")]
    PageOutOfRange { page: i64, total: usize },

    #[error("Not a page number: {0}")]
    InvalidPageInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal too small (minimum 40x10)")]
    TerminalTooSmall,

    #[error("Config directory creation failed: {0}")]
    ConfigDirError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
