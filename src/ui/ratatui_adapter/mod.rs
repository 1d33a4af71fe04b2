//! Ratatui-based gallery frontend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           GalleryApp                        │
//! │  (event loop, drawing)                      │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌──────────────┐ ┌───────────┐ ┌───────────┐
//! │   Terminal   │ │  Ratatui  │ │ Crossterm │
//! │   Renderer   │ │ (widgets) │ │  (events) │
//! └──────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! # Keys
//!
//! - Grid: `1`/`2`/`3` filters, `j`/`k` or arrows move, `enter` opens, `b` goes
//!   back in location history, `q` quits
//! - Overlay: configured viewer keybinds (`esc`, `right`, `left` by default),
//!   `enter` advances like clicking the image, `x` closes like the close button

mod app;
mod events;
mod renderer;
mod state;
mod theme;

pub use app::{GalleryApp, TerminalGallery};
pub use events::{GridCommand, OverlayCommand, grid_command, overlay_command, to_key};
pub use renderer::{Shown, TerminalRenderer};
pub use state::GridState;
pub use theme::Theme;
