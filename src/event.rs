use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
}

/// A key-down or key-up event carrying the raw key identifier.
///
/// Handlers may call [`prevent_default`](KeyEvent::prevent_default); the
/// dispatching source inspects the flag after delivery to decide whether the
/// platform's default action should be suppressed.
#[derive(Debug)]
pub struct KeyEvent {
    key: String,
    kind: KeyEventKind,
    default_prevented: Cell<bool>,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            default_prevented: Cell::new(false),
        }
    }

    pub fn down(key: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Down, key)
    }

    pub fn up(key: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Up, key)
    }

    /// Raw identifier as reported by the source, not yet normalized.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type ListenerId = usize;

pub type Listener = Rc<dyn Fn(&KeyEvent)>;

/// Something key listeners can be attached to.
///
/// The event source is an explicit handle rather than an ambient global, so
/// callers can scope tracking to one source and tests can substitute their
/// own.
pub trait EventTarget {
    fn add_listener(&self, kind: KeyEventKind, listener: Listener) -> ListenerId;
    fn remove_listener(&self, kind: KeyEventKind, id: ListenerId);
}

/// In-process event target with a plain listener registry.
///
/// Single-threaded; listeners run to completion on the emitting call before
/// `emit` returns.
#[derive(Default)]
pub struct EventHub {
    next_id: Cell<ListenerId>,
    down: RefCell<Vec<(ListenerId, Listener)>>,
    up: RefCell<Vec<(ListenerId, Listener)>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self, kind: KeyEventKind) -> &RefCell<Vec<(ListenerId, Listener)>> {
        match kind {
            KeyEventKind::Down => &self.down,
            KeyEventKind::Up => &self.up,
        }
    }

    /// Deliver an event to every listener registered for its kind, in
    /// registration order.
    pub fn emit(&self, event: &KeyEvent) {
        // The registry borrow must not be held across handler calls; handlers
        // may add or remove listeners.
        let listeners: Vec<Listener> = self
            .registry(event.kind())
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    /// Emit a key-down for `key`. Returns whether any handler suppressed the
    /// default action.
    pub fn key_down(&self, key: impl Into<String>) -> bool {
        let event = KeyEvent::down(key);
        self.emit(&event);
        event.default_prevented()
    }

    /// Emit a key-up for `key`. Returns whether any handler suppressed the
    /// default action.
    pub fn key_up(&self, key: impl Into<String>) -> bool {
        let event = KeyEvent::up(key);
        self.emit(&event);
        event.default_prevented()
    }

    pub fn listener_count(&self, kind: KeyEventKind) -> usize {
        self.registry(kind).borrow().len()
    }
}

impl EventTarget for EventHub {
    fn add_listener(&self, kind: KeyEventKind, listener: Listener) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.registry(kind).borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, kind: KeyEventKind, id: ListenerId) {
        self.registry(kind).borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_listener(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> Listener {
        let log = Rc::clone(log);
        let tag = tag.to_string();
        Rc::new(move |event: &KeyEvent| {
            log.borrow_mut().push(format!("{}:{}", tag, event.key()));
        })
    }

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let hub = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        hub.add_listener(KeyEventKind::Down, recording_listener(&log, "down"));
        hub.add_listener(KeyEventKind::Up, recording_listener(&log, "up"));

        hub.key_down("w");
        hub.key_up("w");

        assert_eq!(*log.borrow(), vec!["down:w", "up:w"]);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let hub = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        hub.add_listener(KeyEventKind::Down, recording_listener(&log, "first"));
        hub.add_listener(KeyEventKind::Down, recording_listener(&log, "second"));

        hub.key_down("a");

        assert_eq!(*log.borrow(), vec!["first:a", "second:a"]);
    }

    #[test]
    fn test_removed_listener_no_longer_fires() {
        let hub = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = hub.add_listener(KeyEventKind::Down, recording_listener(&log, "down"));

        hub.key_down("w");
        hub.remove_listener(KeyEventKind::Down, id);
        hub.key_down("w");

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(hub.listener_count(KeyEventKind::Down), 0);
    }

    #[test]
    fn test_prevent_default_is_reported() {
        let hub = EventHub::new();
        hub.add_listener(
            KeyEventKind::Down,
            Rc::new(|event: &KeyEvent| {
                if event.key() == "space" {
                    event.prevent_default();
                }
            }),
        );

        assert!(hub.key_down("space"));
        assert!(!hub.key_down("a"));
        assert!(!hub.key_up("space"));
    }

    #[test]
    fn test_listener_may_remove_itself_during_dispatch() {
        let hub = Rc::new(EventHub::new());
        let fired = Rc::new(Cell::new(0));

        let hub_handle = Rc::clone(&hub);
        let fired_handle = Rc::clone(&fired);
        let id = Rc::new(Cell::new(0));
        let id_handle = Rc::clone(&id);
        let listener: Listener = Rc::new(move |_event: &KeyEvent| {
            fired_handle.set(fired_handle.get() + 1);
            hub_handle.remove_listener(KeyEventKind::Down, id_handle.get());
        });
        id.set(hub.add_listener(KeyEventKind::Down, listener));

        hub.key_down("w");
        hub.key_down("w");

        assert_eq!(fired.get(), 1);
    }
}
