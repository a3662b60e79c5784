//! Global keyboard input surface
//!
//! Every key press read by the event loop is dispatched here. Listeners are
//! registered independently and each one is owned by the `ListenerHandle`
//! returned at registration. There is no global registry: the surface is
//! passed explicitly to whoever needs to listen.

use crossterm::event::KeyEvent;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Kind of widget a key event was originally directed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Single-line text entry
    TextInput,
    /// Multi-line text entry
    TextArea,
    Other,
}

/// A key press together with its original target
#[derive(Debug, Clone, Copy)]
pub struct KeyInput {
    pub key: KeyEvent,
    pub target: TargetKind,
}

impl KeyInput {
    pub fn new(key: KeyEvent, target: TargetKind) -> Self {
        Self { key, target }
    }

    /// True if the key was meant for a text-entry control
    pub fn is_text_entry(&self) -> bool {
        matches!(self.target, TargetKind::TextInput | TargetKind::TextArea)
    }
}

type Listener = Rc<RefCell<dyn FnMut(&KeyInput)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// The document-level keyboard stream
#[derive(Clone, Default)]
pub struct InputSurface {
    registry: Rc<RefCell<Registry>>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned handle is
    /// released or dropped.
    pub fn add_listener<F>(&self, listener: F) -> ListenerHandle
    where
        F: FnMut(&KeyInput) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)));
        tracing::debug!("Key listener {} registered", id);

        ListenerHandle {
            id,
            registry: Some(Rc::downgrade(&self.registry)),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Deliver a key press to every registered listener, in registration order.
    ///
    /// Returns the number of listeners that ran. A listener removed while the
    /// dispatch is in progress is not called afterwards.
    pub fn dispatch(&self, input: &KeyInput) -> usize {
        // Snapshot so listeners may add or remove listeners while we iterate
        let snapshot: Vec<(u64, Listener)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.registry.borrow().listeners.contains_key(&id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => {
                    (&mut *callback)(input);
                    delivered += 1;
                }
                Err(_) => {
                    tracing::warn!("Key listener {} re-entered during dispatch, skipped", id);
                }
            }
        }
        delivered
    }
}

/// Exclusive ownership of one registered listener
pub struct ListenerHandle {
    id: u64,
    registry: Option<Weak<RefCell<Registry>>>,
}

impl ListenerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Unregister the listener now. Returns false if the surface was already gone.
    pub fn release(mut self) -> bool {
        self.detach()
    }

    fn detach(&mut self) -> bool {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return false;
        };
        let removed = registry.borrow_mut().listeners.remove(&self.id).is_some();
        if removed {
            tracing::debug!("Key listener {} removed", self.id);
        }
        removed
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id)
            .field("attached", &self.registry.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::Cell;

    fn input(code: KeyCode) -> KeyInput {
        KeyInput::new(KeyEvent::new(code, KeyModifiers::NONE), TargetKind::Other)
    }

    #[test]
    fn test_dispatch_reaches_listener() {
        let surface = InputSurface::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _handle = surface.add_listener(move |_| h.set(h.get() + 1));

        assert_eq!(surface.dispatch(&input(KeyCode::Right)), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_release_stops_delivery() {
        let surface = InputSurface::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let handle = surface.add_listener(move |_| h.set(h.get() + 1));

        assert!(handle.release());
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(surface.dispatch(&input(KeyCode::Right)), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_drop_removes_listener() {
        let surface = InputSurface::new();
        {
            let _handle = surface.add_listener(|_| {});
            assert_eq!(surface.listener_count(), 1);
        }
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn test_listeners_are_independent() {
        let surface = InputSurface::new();
        let first = surface.add_listener(|_| {});
        let second = surface.add_listener(|_| {});
        assert_ne!(first.id(), second.id());

        first.release();
        assert_eq!(surface.listener_count(), 1);
        assert_eq!(surface.dispatch(&input(KeyCode::Left)), 1);
    }

    #[test]
    fn test_release_after_surface_dropped() {
        let surface = InputSurface::new();
        let handle = surface.add_listener(|_| {});
        drop(surface);
        assert!(!handle.release());
    }

    #[test]
    fn test_listener_removed_during_dispatch_is_skipped() {
        let surface = InputSurface::new();
        let victim: Rc<RefCell<Option<ListenerHandle>>> = Rc::new(RefCell::new(None));
        let second_hits = Rc::new(Cell::new(0));

        let v = Rc::clone(&victim);
        let _first = surface.add_listener(move |_| {
            if let Some(handle) = v.borrow_mut().take() {
                handle.release();
            }
        });
        let h = Rc::clone(&second_hits);
        *victim.borrow_mut() = Some(surface.add_listener(move |_| h.set(h.get() + 1)));

        assert_eq!(surface.dispatch(&input(KeyCode::Right)), 1);
        assert_eq!(second_hits.get(), 0);
    }

    #[test]
    fn test_text_entry_targets() {
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert!(KeyInput::new(key, TargetKind::TextInput).is_text_entry());
        assert!(KeyInput::new(key, TargetKind::TextArea).is_text_entry());
        assert!(!KeyInput::new(key, TargetKind::Other).is_text_entry());
    }
}
