//! Configuration for overlay keybinds.

use super::actions::ViewerAction;
use super::keys::Key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for keybinds.
///
/// Actions left out of the configuration keep their default keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct KeybindConfig {
    /// Keybind mappings, action name to key(s)
    pub keybinds: HashMap<String, KeybindDef>,
}

/// Keybind definition - can be single key, multiple keys, or disabled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeybindDef {
    /// Single keybind
    Single(String),
    /// Multiple alternative keybinds for the same action
    Multiple(Vec<String>),
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            keybinds: default_keybinds(),
        }
    }
}

fn default_keybinds() -> HashMap<String, KeybindDef> {
    let mut keybinds = HashMap::new();
    keybinds.insert("close".to_string(), KeybindDef::Single("esc".to_string()));
    keybinds.insert("next".to_string(), KeybindDef::Single("right".to_string()));
    keybinds.insert("prev".to_string(), KeybindDef::Single("left".to_string()));
    keybinds
}

impl KeybindConfig {
    /// Get the keybind(s) for a given action name.
    ///
    /// Returns an empty vector if the action is not configured.
    #[must_use]
    pub fn get(&self, action: &str) -> Vec<String> {
        self.keybinds.get(action).map_or_else(Vec::new, |def| match def {
            KeybindDef::Single(key) => vec![key.clone()],
            KeybindDef::Multiple(keys) => keys.clone(),
        })
    }

    /// Check if a keybind is disabled for an action.
    #[must_use]
    pub fn is_disabled(&self, action: &str) -> bool {
        self.keybinds.get(action).is_some_and(|def| match def {
            KeybindDef::Single(key) => key == "none",
            KeybindDef::Multiple(keys) => keys.iter().all(|k| k == "none"),
        })
    }

    /// Resolve the configuration into a key lookup table
    ///
    /// Unknown action names and unparseable keys are skipped with a warning.
    /// Actions missing from the configuration keep their default keys.
    #[must_use]
    pub fn bindings(&self) -> KeyBindings {
        let defaults = Self::default();
        let mut map = HashMap::new();

        for action in ViewerAction::ALL {
            let keys = if self.keybinds.contains_key(action.name()) {
                self.get(action.name())
            } else {
                defaults.get(action.name())
            };

            for name in keys.iter().filter(|k| k.as_str() != "none") {
                match name.parse::<Key>() {
                    Ok(key) => {
                        map.insert(key, action);
                    }
                    Err(e) => log::warn!("Ignoring keybind for {}: {e}", action.name()),
                }
            }
        }

        for name in self.keybinds.keys() {
            if ViewerAction::from_name(name).is_none() {
                log::warn!("Ignoring keybind for unknown action {name:?}");
            }
        }

        KeyBindings { map }
    }
}

/// Key to action lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<Key, ViewerAction>,
}

impl KeyBindings {
    /// Action bound to `key`, if any
    #[must_use]
    pub fn action(&self, key: Key) -> Option<ViewerAction> {
        self.map.get(&key).copied()
    }

    /// Keys bound to `action`, sorted by name
    #[must_use]
    pub fn keys_for(&self, action: ViewerAction) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(ToString::to_string);
        keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeybindConfig::default().bindings()
    }
}
