//! Rendering capability
//!
//! The core never touches presentation details. Grid tiles and the overlay
//! are produced by a [`Renderer`] implementation supplied by the host; the
//! core only keeps the opaque [`VisualHandle`]s it gets back.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  PaginationEngine / Viewer   │
//! └──────────────┬───────────────┘
//!                │ render(item, surface)
//!                ▼
//! ┌──────────────────────────────┐
//! │  Renderer (host supplied)    │
//! │  - TerminalRenderer (ratatui)│
//! │  - RecordingRenderer (tests) │
//! └──────────────────────────────┘
//! ```

pub mod mock;

pub use mock::{RecordingRenderer, RenderCall};

use crate::media::MediaItem;

/// Where a rendered item is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// A tile of the paginated grid, at the given projection position
    Grid(usize),
    /// The full-view overlay
    Overlay,
}

/// Outcome of materializing an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderStatus {
    /// The item is displayed
    #[default]
    Ready,
    /// The media could not be displayed; the tile shows a failure marker
    Failed,
}

/// Opaque handle to a displayed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle {
    id: u64,
    status: RenderStatus,
}

impl VisualHandle {
    #[must_use]
    pub const fn new(id: u64, status: RenderStatus) -> Self {
        Self { id, status }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn status(&self) -> RenderStatus {
        self.status
    }

    /// Whether the media failed to display
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, RenderStatus::Failed)
    }
}

/// Turns media items into displayed elements
pub trait Renderer {
    /// Display `item` on `surface`
    fn render(&mut self, item: &MediaItem, surface: Surface) -> VisualHandle;

    /// Remove a previously rendered element
    fn release(&mut self, _handle: VisualHandle) {}

    /// Hide whatever is currently shown on `surface`
    fn dismiss(&mut self, _surface: Surface) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, item: &MediaItem, surface: Surface) -> VisualHandle {
        (**self).render(item, surface)
    }

    fn release(&mut self, handle: VisualHandle) {
        (**self).release(handle);
    }

    fn dismiss(&mut self, surface: Surface) {
        (**self).dismiss(surface);
    }
}
