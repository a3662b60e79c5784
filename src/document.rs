//! Plain-text document split into display pages

use crate::error::{AppError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    text: String,
    pages: Vec<Vec<String>>,
}

impl Document {
    /// Wrap `text` to `width` columns and cut it into pages of `page_lines` lines.
    pub fn from_text(
        title: impl Into<String>,
        text: impl Into<String>,
        width: usize,
        page_lines: usize,
    ) -> Self {
        let text = text.into();
        let pages = paginate(&text, width, page_lines);
        Document {
            title: title.into(),
            text,
            pages,
        }
    }

    /// Read a UTF-8 text file from disk
    pub fn load(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|_| AppError::Utf8Error(path.display().to_string()))
    }

    pub fn repaginate(&mut self, width: usize, page_lines: usize) {
        self.pages = paginate(&self.text, width, page_lines);
        tracing::debug!(
            "Repaginated '{}': {} pages at {} cols x {} lines",
            self.title,
            self.pages.len(),
            width,
            page_lines
        );
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Lines of a page, 1-based
    pub fn page(&self, page: usize) -> Option<&[String]> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .map(|lines| lines.as_slice())
    }
}

fn paginate(text: &str, width: usize, page_lines: usize) -> Vec<Vec<String>> {
    let width = width.max(1);
    let page_lines = page_lines.max(1);

    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        for wrapped in textwrap::wrap(raw, width) {
            lines.push(wrapped.into_owned());
        }
    }

    let mut pages: Vec<Vec<String>> = lines
        .chunks(page_lines)
        .map(|chunk| chunk.to_vec())
        .collect();

    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}
