use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::key::normalize_key;

/// Default-prevention policy, resolved per key.
///
/// Serializes as either a bare boolean (applies to every key) or an array of
/// key names (applies only to those keys).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PreventDefault {
    All(bool),
    Keys(HashSet<String>),
}

impl PreventDefault {
    pub fn all() -> Self {
        Self::All(true)
    }

    pub fn none() -> Self {
        Self::All(false)
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Keys(keys.into_iter().map(|k| normalize_key(k.as_ref())).collect())
    }

    /// Whether the policy suppresses the default action for this key.
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            Self::All(all) => *all,
            Self::Keys(keys) => keys.contains(key),
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::All(all) => Self::All(all),
            Self::Keys(keys) => Self::Keys(keys.iter().map(|k| normalize_key(k)).collect()),
        }
    }
}

impl Default for PreventDefault {
    fn default() -> Self {
        Self::All(false)
    }
}

impl From<bool> for PreventDefault {
    fn from(all: bool) -> Self {
        Self::All(all)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse options file")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a key state tracker.
///
/// Every field has a permissive default: track all keys, no combos, no
/// default prevention, empty initial state. Key names in all fields are
/// normalized the same way as incoming events, so `"Shift"` in a config file
/// matches the `"shift"` a key event produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerOptions {
    /// If present, only these keys are tracked.
    pub allowed: Option<HashSet<String>>,
    /// Keys excluded from tracking even when allowed.
    pub blocked: HashSet<String>,
    /// Combo name to the set of keys that must all be held.
    pub combos: HashMap<String, HashSet<String>>,
    /// Seed entries for the initial published state.
    pub initial_value: HashMap<String, bool>,
    pub prevent_default: PreventDefault,
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict tracking to the given keys.
    pub fn allow<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed = Some(keys.into_iter().map(|k| normalize_key(k.as_ref())).collect());
        self
    }

    /// Exclude the given keys from tracking.
    pub fn block<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked
            .extend(keys.into_iter().map(|k| normalize_key(k.as_ref())));
        self
    }

    /// Add a named combo that is active while all member keys are held.
    pub fn combo<I, S>(mut self, name: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.combos.insert(
            name.to_string(),
            keys.into_iter().map(|k| normalize_key(k.as_ref())).collect(),
        );
        self
    }

    /// Seed the initial state of a single key.
    pub fn seed(mut self, key: &str, pressed: bool) -> Self {
        self.initial_value.insert(normalize_key(key), pressed);
        self
    }

    /// Set the default-prevention policy.
    pub fn prevent(mut self, policy: impl Into<PreventDefault>) -> Self {
        self.prevent_default = policy.into();
        self
    }

    /// Whether a key event for `key` should update tracked state.
    ///
    /// A key in both lists is not tracked; the block list wins.
    pub fn tracks(&self, key: &str) -> bool {
        if self.blocked.contains(key) {
            return false;
        }
        match &self.allowed {
            Some(allowed) => allowed.contains(key),
            None => true,
        }
    }

    /// Whether the default action for `key` should be suppressed.
    ///
    /// Independent of the tracking filter.
    pub fn prevents_default(&self, key: &str) -> bool {
        self.prevent_default.applies_to(key)
    }

    /// Normalize every key-name field. Combo names are output names and pass
    /// through untouched.
    pub fn normalized(self) -> Self {
        Self {
            allowed: self
                .allowed
                .map(|keys| keys.iter().map(|k| normalize_key(k)).collect()),
            blocked: self.blocked.iter().map(|k| normalize_key(k)).collect(),
            combos: self
                .combos
                .into_iter()
                .map(|(name, keys)| (name, keys.iter().map(|k| normalize_key(k)).collect()))
                .collect(),
            initial_value: self
                .initial_value
                .into_iter()
                .map(|(key, pressed)| (normalize_key(&key), pressed))
                .collect(),
            prevent_default: self.prevent_default.normalized(),
        }
    }

    /// Load options from a JSON file, normalizing key names.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&content)?;
        Ok(options.normalized())
    }

    /// Save options to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), OptionsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
