//! Keybind system for the overlay viewer.
//!
//! This module provides customizable keyboard shortcuts for navigating the
//! overlay. Bindings are only consulted while the overlay is open.

pub mod actions;
pub mod config;
pub mod keys;

pub use actions::ViewerAction;
pub use config::{KeyBindings, KeybindConfig, KeybindDef};
pub use keys::{Key, UnknownKey};
