use winit::event::{ElementState, KeyboardInput, WindowEvent};

use crate::event::{EventHub, EventTarget, KeyEventKind, Listener, ListenerId};
use crate::key::key_name;

/// Bridges winit window events onto a key event target.
///
/// Pump every `WindowEvent` through [`dispatch`](WindowEvents::dispatch) from
/// the event loop; keyboard input is mapped to canonical key names and
/// emitted to attached listeners. Keycodes without a canonical name are
/// skipped.
pub struct WindowEvents {
    hub: EventHub,
}

impl WindowEvents {
    pub fn new() -> Self {
        Self {
            hub: EventHub::new(),
        }
    }

    /// Feed one window event. Returns whether a handler suppressed the
    /// default action, so the caller can stop forwarding the event to other
    /// layers.
    pub fn dispatch(&self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { input, .. } => self.dispatch_key(input),
            _ => false,
        }
    }

    fn dispatch_key(&self, input: &KeyboardInput) -> bool {
        let name = match input.virtual_keycode.and_then(key_name) {
            Some(name) => name,
            None => return false,
        };
        match input.state {
            ElementState::Pressed => self.hub.key_down(name),
            _ => self.hub.key_up(name),
        }
    }
}

impl Default for WindowEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTarget for WindowEvents {
    fn add_listener(&self, kind: KeyEventKind, listener: Listener) -> ListenerId {
        self.hub.add_listener(kind, listener)
    }

    fn remove_listener(&self, kind: KeyEventKind, id: ListenerId) {
        self.hub.remove_listener(kind, id)
    }
}
