//! Command-line interface parsing and validation
//!
//! This module handles CLI argument parsing using clap and validates
//! user inputs for correctness.

use crate::constants::{MAX_MAX_WIDTH, MAX_PAGE_LINES, MIN_MAX_WIDTH, MIN_PAGE_LINES};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pagenav")]
#[command(version = "0.0.1")]
#[command(about = "Page through text in your terminal with the arrow keys", long_about = None)]
pub struct Cli {
    /// Path to a text file to open
    pub file: String,

    /// Page to open first (1-based)
    #[arg(short = 'p', long, value_name = "PAGE", default_value_t = 1)]
    pub page: usize,

    /// Maximum text width in columns (20-200)
    #[arg(short = 'm', long, value_name = "COLS")]
    pub max_width: Option<usize>,

    /// Lines per page (1-500)
    #[arg(short = 'n', long, value_name = "LINES")]
    pub page_lines: Option<usize>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Cli {
    /// Validate CLI arguments
    /// Returns error if a numeric option is out of bounds
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("Pages start at 1".to_string());
        }
        if let Some(width) = self.max_width {
            if width < MIN_MAX_WIDTH {
                return Err(format!("Max width too small (minimum {})", MIN_MAX_WIDTH));
            }
            if width > MAX_MAX_WIDTH {
                return Err(format!("Max width too large (maximum {})", MAX_MAX_WIDTH));
            }
        }
        if let Some(lines) = self.page_lines {
            if !(MIN_PAGE_LINES..=MAX_PAGE_LINES).contains(&lines) {
                return Err(format!(
                    "Lines per page must be between {} and {}",
                    MIN_PAGE_LINES, MAX_PAGE_LINES
                ));
            }
        }
        Ok(())
    }
}
