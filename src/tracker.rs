use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::TrackerOptions;
use crate::event::{EventTarget, KeyEvent, KeyEventKind, Listener, ListenerId};
use crate::key::normalize_key;
use crate::state::KeySnapshot;

#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error("tracker is already attached to a target")]
    AlreadyAttached,
    #[error("tracker was detached and cannot be reused")]
    Detached,
}

type Observer = Box<dyn FnMut(&KeySnapshot)>;

struct TrackerState {
    options: TrackerOptions,
    keys: HashMap<String, bool>,
}

impl TrackerState {
    fn new(options: TrackerOptions) -> Self {
        let options = options.normalized();
        // Seeds failing the tracking filter must never reach published state.
        let keys = options
            .initial_value
            .iter()
            .filter(|(key, _)| options.tracks(key))
            .map(|(key, pressed)| (key.clone(), *pressed))
            .collect();
        Self { options, keys }
    }

    /// Apply one event against the live key map. Returns the fresh snapshot
    /// when the event qualified for tracking.
    fn apply(&mut self, event: &KeyEvent) -> Option<KeySnapshot> {
        let key = normalize_key(event.key());

        // Default prevention is independent of the tracking filter.
        if self.options.prevents_default(&key) {
            event.prevent_default();
        }

        if !self.options.tracks(&key) {
            return None;
        }

        let pressed = event.kind() == KeyEventKind::Down;
        log::trace!("key {:?} {}", key, if pressed { "down" } else { "up" });
        self.keys.insert(key, pressed);
        Some(self.snapshot())
    }

    fn set_options(&mut self, options: TrackerOptions) {
        self.options = options.normalized();
        let options = &self.options;
        self.keys.retain(|key, _| options.tracks(key));
    }

    fn snapshot(&self) -> KeySnapshot {
        let mut entries = self.keys.clone();
        // Combos merge last and shadow a colliding key name. A combo with no
        // members is vacuously active.
        for (name, members) in &self.options.combos {
            let active = members
                .iter()
                .all(|member| self.keys.get(member).copied().unwrap_or(false));
            entries.insert(name.clone(), active);
        }
        KeySnapshot::new(entries)
    }
}

struct Subscription {
    target: Rc<dyn EventTarget>,
    down: ListenerId,
    up: ListenerId,
}

/// Tracks the pressed/released state of keyboard keys observed on an event
/// target.
///
/// The tracker starts unsubscribed; [`attach`](KeyStateTracker::attach)
/// registers key-down/key-up listeners on a target, and every qualifying
/// event then updates the key map, recomputes combo flags, and hands a fresh
/// [`KeySnapshot`] to each registered observer. Detaching removes both
/// listeners and is terminal: further events never change published state,
/// and tracking again takes a new instance.
pub struct KeyStateTracker {
    state: Rc<RefCell<TrackerState>>,
    observers: Rc<RefCell<Vec<Observer>>>,
    subscription: Option<Subscription>,
    detached: bool,
}

impl KeyStateTracker {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            state: Rc::new(RefCell::new(TrackerState::new(options))),
            observers: Rc::new(RefCell::new(Vec::new())),
            subscription: None,
            detached: false,
        }
    }

    /// Register an observer invoked with the new snapshot after every
    /// qualifying update. Observers run in registration order.
    pub fn on_update(&mut self, observer: impl FnMut(&KeySnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Attach key-down/key-up listeners to `target`.
    pub fn attach(&mut self, target: Rc<dyn EventTarget>) -> Result<(), TrackerError> {
        if self.detached {
            return Err(TrackerError::Detached);
        }
        if self.subscription.is_some() {
            return Err(TrackerError::AlreadyAttached);
        }
        self.subscribe(target);
        Ok(())
    }

    /// Move the subscription to a new target, detaching from the old one
    /// first so no listener leaks behind.
    pub fn set_target(&mut self, target: Rc<dyn EventTarget>) -> Result<(), TrackerError> {
        if self.detached {
            return Err(TrackerError::Detached);
        }
        self.unsubscribe();
        self.subscribe(target);
        Ok(())
    }

    /// Replace the options. The installed handlers read options through the
    /// shared cell, so the new filter and combos take effect on the next
    /// event without tearing down the subscription. Entries failing the new
    /// tracking filter are dropped from the key map.
    pub fn set_options(&mut self, options: TrackerOptions) {
        self.state.borrow_mut().set_options(options);
    }

    /// Detach both listeners. Terminal: a detached tracker keeps serving its
    /// frozen snapshot but cannot be attached again.
    pub fn detach(&mut self) {
        self.unsubscribe();
        self.detached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Current view of key and combo states.
    pub fn snapshot(&self) -> KeySnapshot {
        self.state.borrow().snapshot()
    }

    /// Whether a key or combo is currently held.
    pub fn key_held(&self, key: &str) -> bool {
        self.snapshot().key_held(key)
    }

    fn subscribe(&mut self, target: Rc<dyn EventTarget>) {
        let handler = self.handler();
        let down = target.add_listener(KeyEventKind::Down, Rc::clone(&handler));
        let up = target.add_listener(KeyEventKind::Up, handler);
        log::debug!("attached key listeners");
        self.subscription = Some(Subscription { target, down, up });
    }

    fn unsubscribe(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription
                .target
                .remove_listener(KeyEventKind::Down, subscription.down);
            subscription
                .target
                .remove_listener(KeyEventKind::Up, subscription.up);
            log::debug!("detached key listeners");
        }
    }

    fn handler(&self) -> Listener {
        let state = Rc::clone(&self.state);
        let observers = Rc::clone(&self.observers);
        Rc::new(move |event: &KeyEvent| {
            // Mutation and snapshot happen in one critical section against
            // the live map, so the next event always sees this one fully
            // applied.
            let published = state.borrow_mut().apply(event);
            if let Some(snapshot) = published {
                let mut observers = observers.borrow_mut();
                for observer in observers.iter_mut() {
                    observer(&snapshot);
                }
            }
        })
    }
}

impl Drop for KeyStateTracker {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
