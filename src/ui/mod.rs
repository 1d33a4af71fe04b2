//! Terminal frontend
//!
//! Hosts the UI-agnostic gallery core in a terminal. Presentation lives behind
//! the `Renderer` capability; this module supplies the ratatui implementation
//! and the event loop that feeds terminal input into the gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Gallery core                       │
//! │   (collection, pagination, viewer)      │
//! └────────────────┬────────────────────────┘
//!                  │ Renderer trait
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      TerminalRenderer                   │
//! │   (tile and overlay state)              │
//! └────────────────┬────────────────────────┘
//!                  │ drawn by
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      GalleryApp (ratatui + crossterm)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gallerist::gallery::{Gallery, GalleryOptions};
//! use gallerist::location::InMemoryLocation;
//! use gallerist::media::JsonFileSource;
//! use gallerist::prefs::MemoryPreferences;
//! use gallerist::ui::{GalleryApp, TerminalRenderer};
//!
//! let mut gallery = Gallery::new(
//!     TerminalRenderer::new(),
//!     MemoryPreferences::new(),
//!     InMemoryLocation::new(),
//!     GalleryOptions::default(),
//! );
//! gallery.load(JsonFileSource::new("media.json"));
//!
//! GalleryApp::new(gallery).run()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use ratatui_adapter::{GalleryApp, GridState, Shown, TerminalGallery, TerminalRenderer, Theme};
