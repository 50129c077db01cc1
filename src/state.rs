use std::collections::HashMap;

use serde::Serialize;

use crate::key::normalize_key;

/// Immutable view of key and combo states at a point in time.
///
/// Keys appear once their first qualifying event arrives; an absent key is
/// not pressed. Combo flags live in the same mapping as raw keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeySnapshot {
    entries: HashMap<String, bool>,
}

impl KeySnapshot {
    pub(crate) fn new(entries: HashMap<String, bool>) -> Self {
        Self { entries }
    }

    /// Whether a key (or combo) is currently held. The name is normalized
    /// before lookup, so `held("Shift")` matches the tracked `"shift"`.
    pub fn key_held(&self, key: &str) -> bool {
        if let Some(value) = self.entries.get(&normalize_key(key)) {
            *value
        } else {
            false
        }
    }

    /// Raw entry lookup, distinguishing an absent key from a released one.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(&normalize_key(key)).copied()
    }

    /// Names currently held, sorted for stable display.
    pub fn held_keys(&self) -> Vec<&str> {
        let mut held: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(name, _)| name.as_str())
            .collect();
        held.sort_unstable();
        held
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(name, pressed)| (name.as_str(), *pressed))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, bool>> for KeySnapshot {
    fn from(entries: HashMap<String, bool>) -> Self {
        Self::new(entries)
    }
}
