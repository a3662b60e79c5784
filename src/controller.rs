//! Page controller: owns the pagination state and answers intents
//!
//! The controller is the only writer of the element's page attributes. The
//! binding only reads them and asks for changes through intents.

use crate::document::Document;
use crate::element::{CURRENT_PAGE_ATTR, Element, TOTAL_PAGES_ATTR, parse_int};
use crate::error::{AppError, Result};
use crate::intent::Intent;

pub struct PageController {
    document: Document,
    element: Element,
    current_page: usize,
}

impl PageController {
    pub fn new(document: Document, element: Element, start_page: usize) -> Self {
        let current_page = start_page.clamp(1, document.total_pages());
        let controller = PageController {
            document,
            element,
            current_page,
        };
        controller.publish();
        controller
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.document.total_pages()
    }

    pub fn current_lines(&self) -> &[String] {
        self.document.page(self.current_page).unwrap_or(&[])
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Pagination { page } => self.go_to(page),
        }
    }

    /// Jump to a page typed by the user
    pub fn jump_to(&mut self, raw: &str) -> Result<()> {
        let page = parse_int(raw).ok_or_else(|| AppError::InvalidPageInput(raw.to_string()))?;
        self.go_to(page)
    }

    pub fn repaginate(&mut self, width: usize, page_lines: usize) {
        self.document.repaginate(width, page_lines);
        self.current_page = self.current_page.clamp(1, self.document.total_pages());
        self.publish();
    }

    fn go_to(&mut self, page: i64) -> Result<()> {
        let total = self.document.total_pages();
        let target = usize::try_from(page)
            .ok()
            .filter(|p| (1..=total).contains(p))
            .ok_or(AppError::PageOutOfRange { page, total })?;

        if target != self.current_page {
            tracing::info!("Page {} -> {} (of {})", self.current_page, target, total);
            self.current_page = target;
        }
        self.publish();
        Ok(())
    }

    /// Write the page attributes the binding reads
    fn publish(&self) {
        self.element
            .set_data(CURRENT_PAGE_ATTR, self.current_page.to_string());
        self.element
            .set_data(TOTAL_PAGES_ATTR, self.document.total_pages().to_string());
    }
}
