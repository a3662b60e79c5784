//! UI element with string data attributes
//!
//! The page controller writes the current page and page count into an element's
//! dataset. Readers pull them through `PageSource` at the moment they need them.

use crate::surface::TargetKind;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const CURRENT_PAGE_ATTR: &str = "current-page";
pub const TOTAL_PAGES_ATTR: &str = "total-pages";

/// Pull-based accessor for the displayed page and the page count.
///
/// `None` means the value is missing or not a number.
pub trait PageSource {
    fn current_page(&self) -> Option<i64>;
    fn total_pages(&self) -> Option<i64>;
}

/// A node in the UI tree. Clones share the same dataset.
#[derive(Debug, Clone)]
pub struct Element {
    kind: TargetKind,
    dataset: Rc<RefCell<HashMap<String, String>>>,
}

impl Element {
    pub fn new(kind: TargetKind) -> Self {
        Element {
            kind,
            dataset: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn set_data(&self, name: &str, value: impl Into<String>) {
        self.dataset
            .borrow_mut()
            .insert(name.to_string(), value.into());
    }

    fn int_data(&self, name: &str) -> Option<i64> {
        self.dataset.borrow().get(name).and_then(|raw| parse_int(raw))
    }
}

impl PageSource for Element {
    fn current_page(&self) -> Option<i64> {
        self.int_data(CURRENT_PAGE_ATTR)
    }

    fn total_pages(&self) -> Option<i64> {
        self.int_data(TOTAL_PAGES_ATTR)
    }
}

/// Lenient decimal parse for attribute values.
///
/// Leading whitespace and an optional sign are accepted, then the leading run
/// of decimal digits is taken and anything after it is ignored. There is no
/// radix prefix handling (`"0x10"` is 0). Returns `None` when there are no
/// digits or the value does not fit in an `i64`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
