//! Pagination engine - lazily reveals pages of the projection
//!
//! # Architecture
//!
//! - `viewport`: `ScrollMetrics` and the "near end of content" test
//! - `coalesce`: `Coalescer`, collapses scroll bursts into one call
//!
//! # Lifecycle
//!
//! ```text
//! reset(projection) ─→ page 0 materialized
//!        │
//!        ▼
//! next_page() ─→ page 1 … page max ─→ no-op
//!        │
//! filter change ─→ reset(projection) (all tiles released)
//! ```

pub mod coalesce;
pub mod viewport;

pub use coalesce::{Coalescer, DEFAULT_COALESCE_WINDOW};
pub use viewport::{ScrollMetrics, Trigger};

use crate::collection::Projection;
use crate::render::{Renderer, Surface, VisualHandle};
use std::ops::Range;
use std::sync::Arc;

/// Number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// A materialized grid tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Position of the item in the projection
    pub position: usize,
    /// Handle returned by the renderer
    pub handle: VisualHandle,
}

/// A revealed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    /// Projection positions covered by this page
    pub positions: Range<usize>,
}

/// Reveals the projection page by page
#[derive(Debug)]
pub struct PaginationEngine {
    page_size: usize,
    page_index: usize,
    projection: Arc<Projection>,
    tiles: Vec<Tile>,
}

impl PaginationEngine {
    /// Create an engine over an empty projection
    ///
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_index: 0,
            projection: Arc::new(Projection::empty()),
            tiles: Vec::new(),
        }
    }

    /// Discard every materialized page and render page 0 of `projection`
    pub fn reset(&mut self, projection: Arc<Projection>, renderer: &mut dyn Renderer) -> Page {
        for tile in self.tiles.drain(..) {
            renderer.release(tile.handle);
        }
        self.projection = projection;
        self.page_index = 0;
        log::debug!("Pagination reset over {} items", self.projection.len());
        self.materialize(0, renderer)
    }

    /// Reveal the next page, if there is one
    ///
    /// Calling this at the last page (or on an empty projection) does nothing.
    pub fn next_page(&mut self, renderer: &mut dyn Renderer) -> Option<Page> {
        let max_index = self.max_page_index()?;
        if self.page_index >= max_index {
            return None;
        }

        self.page_index += 1;
        log::debug!("Revealing page {} of {}", self.page_index, max_index);
        Some(self.materialize(self.page_index, renderer))
    }

    /// `ceil(len / page_size) - 1`, or `None` for an empty projection
    #[must_use]
    pub fn max_page_index(&self) -> Option<usize> {
        self.projection.len().div_ceil(self.page_size).checked_sub(1)
    }

    /// Projection positions covered by page `index`, clamped to the projection
    #[must_use]
    pub fn page_bounds(&self, index: usize) -> Range<usize> {
        let len = self.projection.len();
        let start = index.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Every materialized tile, in projection order
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at a projection position, if it has been revealed
    #[must_use]
    pub fn tile(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position).filter(|tile| tile.position == position)
    }

    /// Whether every item of the projection has been revealed
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.max_page_index().is_none_or(|max| self.page_index >= max)
    }

    #[must_use]
    pub fn projection(&self) -> &Arc<Projection> {
        &self.projection
    }

    fn materialize(&mut self, index: usize, renderer: &mut dyn Renderer) -> Page {
        let positions = self.page_bounds(index);
        for (position, item) in self.projection.window(positions.clone()) {
            let handle = renderer.render(item, Surface::Grid(position));
            self.tiles.push(Tile { position, handle });
        }
        Page { index, positions }
    }
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{FilterMode, RecencyWindow};
    use crate::media::MediaItem;
    use crate::render::{RecordingRenderer, RenderCall};
    use crate::testing::{fixed_now, items_with_likes};

    fn projection(likes: &[i64]) -> Arc<Projection> {
        let master: Arc<[MediaItem]> = items_with_likes(likes).into();
        Arc::new(FilterMode::MostLiked.apply(&master, RecencyWindow::default(), fixed_now()))
    }

    fn urls(renderer: &RecordingRenderer) -> Vec<&str> {
        renderer.rendered_on(false)
    }

    #[test]
    fn test_reset_renders_first_page() {
        let mut renderer = RecordingRenderer::new();
        let mut engine = PaginationEngine::new(2);

        let page = engine.reset(projection(&[5, 10, 1]), &mut renderer);

        assert_eq!(page, Page { index: 0, positions: 0..2 });
        assert_eq!(urls(&renderer), vec!["item-1", "item-0"]);
    }

    #[test]
    fn test_next_page_stops_at_last_page() {
        let mut renderer = RecordingRenderer::new();
        let mut engine = PaginationEngine::new(2);
        engine.reset(projection(&[5, 10, 1]), &mut renderer);

        let page = engine.next_page(&mut renderer).unwrap();
        assert_eq!(page.positions, 2..3);
        assert_eq!(urls(&renderer), vec!["item-1", "item-0", "item-2"]);

        assert!(engine.next_page(&mut renderer).is_none());
        assert_eq!(engine.page_index(), 1);
        assert!(engine.is_exhausted());
    }

    #[test]
    fn test_next_page_never_passes_max() {
        let mut renderer = RecordingRenderer::new();
        let mut engine = PaginationEngine::new(DEFAULT_PAGE_SIZE);
        engine.reset(projection(&[1; 30]), &mut renderer);

        for _ in 0..10 {
            engine.next_page(&mut renderer);
        }
        assert_eq!(engine.max_page_index(), Some(2));
        assert_eq!(engine.page_index(), 2);
        assert_eq!(engine.tiles().len(), 30);
    }

    #[test]
    fn test_empty_projection_is_inert() {
        let mut renderer = RecordingRenderer::new();
        let mut engine = PaginationEngine::default();
        let page = engine.reset(projection(&[]), &mut renderer);

        assert!(page.positions.is_empty());
        assert_eq!(engine.max_page_index(), None);
        assert!(engine.next_page(&mut renderer).is_none());
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_reset_releases_tiles() {
        let mut renderer = RecordingRenderer::new();
        let mut engine = PaginationEngine::new(2);
        engine.reset(projection(&[5, 10, 1]), &mut renderer);
        engine.next_page(&mut renderer);
        renderer.clear();

        engine.reset(projection(&[7]), &mut renderer);

        let released = renderer
            .calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Release(_)))
            .count();
        assert_eq!(released, 3);
        assert_eq!(engine.page_index(), 0);
        assert_eq!(engine.tiles().len(), 1);
    }

    #[test]
    fn test_zero_page_size() {
        let engine = PaginationEngine::new(0);
        assert_eq!(engine.page_size(), 1);
    }
}
