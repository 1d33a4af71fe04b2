//! Gallerist - a filterable, paginated media gallery with a deep-linkable overlay viewer
//!
//! This library provides the UI-agnostic core of a media gallery: a collection
//! controller that filters and sorts the master list and persists the chosen
//! mode, a pagination engine that reveals pages as the viewport nears the end
//! of content, and an overlay viewer whose state is mirrored in a shareable
//! location token. Presentation, persistence and location are reached through
//! narrow traits; a ratatui frontend is included.

use thiserror::Error;

pub mod cli;
pub mod collection;
pub mod config;
pub mod gallery;
pub mod keybinds;
pub mod location;
pub mod media;
pub mod pagination;
pub mod prefs;
pub mod render;
pub mod ui;
pub mod viewer;

#[cfg(test)]
pub mod testing;

pub use gallery::{Gallery, GalleryEvent, GalleryOptions, LoadState};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The collection could not be loaded
    #[error("Load error: {0}")]
    LoadError(#[from] media::LoadError),
    /// Preferences could not be opened or written
    #[error("Preferences error: {0}")]
    PrefsError(#[from] prefs::PrefsError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal frontend error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
