//! Pressed/released key state tracking for interactive applications.
//!
//! A [`KeyStateTracker`] subscribes to key-down/key-up events on an injected
//! [`EventTarget`], keeps a live map of normalized key names to pressed
//! state, and publishes an immutable [`KeySnapshot`] on every qualifying
//! change, optionally augmented with combo flags that are active only while
//! several keys are held together.
//!
//! ```
//! use std::rc::Rc;
//! use wasd::{EventHub, KeyStateTracker, TrackerOptions};
//!
//! let hub = Rc::new(EventHub::new());
//! let options = TrackerOptions::new()
//!     .allow(["w", "a", "s", "d"])
//!     .combo("diagonal", ["w", "a"]);
//! let mut tracker = KeyStateTracker::new(options);
//! tracker.attach(hub.clone()).unwrap();
//!
//! hub.key_down("w");
//! hub.key_down("a");
//! assert!(tracker.key_held("diagonal"));
//! ```
//!
//! For real windows, [`WindowEvents`] adapts winit's event stream into a
//! target a tracker can attach to.

mod config;
mod event;
mod key;
mod state;
mod tracker;
mod window;

pub use config::{OptionsError, PreventDefault, TrackerOptions};
pub use event::{EventHub, EventTarget, KeyEvent, KeyEventKind, Listener, ListenerId};
pub use key::{key_name, normalize_key};
pub use state::KeySnapshot;
pub use tracker::{KeyStateTracker, TrackerError};
pub use window::WindowEvents;
