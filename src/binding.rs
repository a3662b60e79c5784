//! Arrow-key pagination binding
//!
//! Attaches one listener to the input surface for as long as the owning element
//! is mounted and turns Left/Right presses into pagination intents. The page
//! numbers are pulled from the element on every key press, so attribute updates
//! need no synchronization.

use crate::element::PageSource;
use crate::intent::{Intent, IntentSink};
use crate::surface::{InputSurface, KeyInput, ListenerHandle};
use crossterm::event::{KeyCode, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Attached,
    Detached,
}

/// Decide what a single key press means for the given pages.
///
/// Returns `None` for text-entry targets, keys other than Left/Right, key
/// releases, pages that are not numbers, and moves past either end.
pub fn translate<P: PageSource + ?Sized>(input: &KeyInput, pages: &P) -> Option<Intent> {
    // Never steal keys from form fields
    if input.is_text_entry() {
        return None;
    }
    if input.key.kind == KeyEventKind::Release {
        return None;
    }

    let current = pages.current_page();
    let total = pages.total_pages();

    match input.key.code {
        KeyCode::Right => match (current, total) {
            (Some(current), Some(total)) if current < total => Some(Intent::Pagination {
                page: current + 1,
            }),
            _ => None,
        },
        KeyCode::Left => match current {
            Some(current) if current > 1 => Some(Intent::Pagination { page: current - 1 }),
            _ => None,
        },
        _ => None,
    }
}

/// One mounted instance of the binding. Owns exactly one listener while attached.
#[derive(Debug)]
pub struct KeyboardPaginationBinding {
    handle: Option<ListenerHandle>,
}

impl KeyboardPaginationBinding {
    /// Mount: register the key listener on `surface`.
    pub fn activate<P, S>(surface: &InputSurface, pages: P, sink: S) -> Self
    where
        P: PageSource + 'static,
        S: IntentSink + 'static,
    {
        let handle = surface.add_listener(move |input| {
            if let Some(intent) = translate(input, &pages) {
                tracing::debug!("Key {:?} -> {:?}", input.key.code, intent);
                sink.push_intent(intent);
            }
        });
        tracing::info!("Pagination binding attached (listener {})", handle.id());

        KeyboardPaginationBinding {
            handle: Some(handle),
        }
    }

    /// Update hook. Intentionally empty: page numbers are read at key time, so
    /// there is nothing to refresh when the element's attributes change.
    pub fn updated(&self) {}

    /// Unmount: unregister the listener. Calling it again does nothing.
    pub fn deactivate(&mut self) {
        if let Some(handle) = self.handle.take() {
            let id = handle.id();
            handle.release();
            tracing::info!("Pagination binding detached (listener {})", id);
        }
    }

    pub fn state(&self) -> BindingState {
        if self.handle.is_some() {
            BindingState::Attached
        } else {
            BindingState::Detached
        }
    }
}

impl Drop for KeyboardPaginationBinding {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CURRENT_PAGE_ATTR, Element, TOTAL_PAGES_ATTR};
    use crate::surface::TargetKind;
    use crossterm::event::{KeyEvent, KeyEventState, KeyModifiers};
    use tokio::sync::mpsc;

    fn press(code: KeyCode, target: TargetKind) -> KeyInput {
        KeyInput::new(KeyEvent::new(code, KeyModifiers::NONE), target)
    }

    fn element(current: &str, total: &str) -> Element {
        let el = Element::new(TargetKind::Other);
        el.set_data(CURRENT_PAGE_ATTR, current);
        el.set_data(TOTAL_PAGES_ATTR, total);
        el
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Intent>) -> Vec<Intent> {
        let mut out = Vec::new();
        while let Ok(intent) = rx.try_recv() {
            out.push(intent);
        }
        out
    }

    #[test]
    fn test_right_moves_forward() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _binding = KeyboardPaginationBinding::activate(&surface, element("3", "5"), tx);

        surface.dispatch(&press(KeyCode::Right, TargetKind::Other));
        assert_eq!(drain(&mut rx), vec![Intent::Pagination { page: 4 }]);
    }

    #[test]
    fn test_left_on_first_page_does_nothing() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _binding = KeyboardPaginationBinding::activate(&surface, element("1", "5"), tx);

        surface.dispatch(&press(KeyCode::Left, TargetKind::Other));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_text_input_target_is_ignored() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _binding = KeyboardPaginationBinding::activate(&surface, element("3", "5"), tx);

        surface.dispatch(&press(KeyCode::Right, TargetKind::TextInput));
        surface.dispatch(&press(KeyCode::Left, TargetKind::TextArea));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_every_interior_page() {
        let total = 6;
        for current in 1..=total {
            let el = element(&current.to_string(), &total.to_string());

            let left = translate(&press(KeyCode::Left, TargetKind::Other), &el);
            let right = translate(&press(KeyCode::Right, TargetKind::Other), &el);

            if current >= 2 {
                assert_eq!(left, Some(Intent::Pagination { page: current - 1 }));
            } else {
                assert_eq!(left, None);
            }
            if current < total {
                assert_eq!(right, Some(Intent::Pagination { page: current + 1 }));
            } else {
                assert_eq!(right, None);
            }
        }
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let el = element("3", "5");
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Char('l')] {
            assert_eq!(translate(&press(code, TargetKind::Other), &el), None);
        }
    }

    #[test]
    fn test_not_a_number_is_a_no_op() {
        let right = press(KeyCode::Right, TargetKind::Other);
        let left = press(KeyCode::Left, TargetKind::Other);

        assert_eq!(translate(&right, &element("abc", "5")), None);
        assert_eq!(translate(&right, &element("3", "")), None);
        assert_eq!(translate(&left, &element("x", "5")), None);
        assert_eq!(translate(&right, &Element::new(TargetKind::Other)), None);
    }

    #[test]
    fn test_attribute_cleared_after_mount_stops_right() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let el = element("3", "5");
        let _binding = KeyboardPaginationBinding::activate(&surface, el.clone(), tx);

        el.set_data(TOTAL_PAGES_ATTR, "");
        assert_eq!(surface.dispatch(&press(KeyCode::Right, TargetKind::Other)), 1);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_left_ignores_total_pages() {
        let left = press(KeyCode::Left, TargetKind::Other);
        assert_eq!(
            translate(&left, &element("3", "oops")),
            Some(Intent::Pagination { page: 2 })
        );
    }

    #[test]
    fn test_release_is_ignored_and_repeat_counts() {
        let el = element("2", "5");
        let mut key = KeyEvent::new_with_kind_and_state(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(&KeyInput::new(key, TargetKind::Other), &el), None);

        key.kind = KeyEventKind::Repeat;
        assert_eq!(
            translate(&KeyInput::new(key, TargetKind::Other), &el),
            Some(Intent::Pagination { page: 3 })
        );
    }

    #[test]
    fn test_modifiers_do_not_change_the_key() {
        let el = element("2", "5");
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(
            translate(&KeyInput::new(key, TargetKind::Other), &el),
            Some(Intent::Pagination { page: 1 })
        );
    }

    #[test]
    fn test_pages_are_read_at_key_time() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let el = element("1", "3");
        let binding = KeyboardPaginationBinding::activate(&surface, el.clone(), tx);

        el.set_data(CURRENT_PAGE_ATTR, "3");
        binding.updated();

        surface.dispatch(&press(KeyCode::Right, TargetKind::Other));
        surface.dispatch(&press(KeyCode::Left, TargetKind::Other));
        assert_eq!(drain(&mut rx), vec![Intent::Pagination { page: 2 }]);
    }

    #[test]
    fn test_deactivate_stops_intents() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut binding = KeyboardPaginationBinding::activate(&surface, element("3", "5"), tx);
        assert_eq!(binding.state(), BindingState::Attached);
        assert_eq!(surface.listener_count(), 1);

        binding.deactivate();
        assert_eq!(binding.state(), BindingState::Detached);
        assert_eq!(surface.listener_count(), 0);

        for code in [KeyCode::Left, KeyCode::Right] {
            surface.dispatch(&press(code, TargetKind::Other));
        }
        assert!(drain(&mut rx).is_empty());

        // Second call is harmless
        binding.deactivate();
        assert_eq!(binding.state(), BindingState::Detached);
    }

    #[test]
    fn test_drop_detaches() {
        let surface = InputSurface::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        {
            let _binding = KeyboardPaginationBinding::activate(&surface, element("3", "5"), tx);
            assert_eq!(surface.listener_count(), 1);
        }
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn test_two_bindings_are_independent() {
        let surface = InputSurface::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut first = KeyboardPaginationBinding::activate(&surface, element("2", "5"), tx.clone());
        let _second = KeyboardPaginationBinding::activate(&surface, element("4", "5"), tx);

        surface.dispatch(&press(KeyCode::Right, TargetKind::Other));
        assert_eq!(
            drain(&mut rx),
            vec![
                Intent::Pagination { page: 3 },
                Intent::Pagination { page: 5 }
            ]
        );

        first.deactivate();
        surface.dispatch(&press(KeyCode::Right, TargetKind::Other));
        assert_eq!(drain(&mut rx), vec![Intent::Pagination { page: 5 }]);
    }
}
