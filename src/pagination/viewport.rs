//! Scroll geometry used to decide when another page should appear

/// Geometry of the rendered grid, in any consistent unit (rows, pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Total extent of the rendered content
    pub content_extent: u32,
    /// Visible extent of the viewport
    pub viewport_extent: u32,
    /// How far the viewport is scrolled
    pub scroll_offset: u32,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(content_extent: u32, viewport_extent: u32, scroll_offset: u32) -> Self {
        Self {
            content_extent,
            viewport_extent,
            scroll_offset,
        }
    }

    /// The viewport has reached the end of the rendered content
    #[must_use]
    pub const fn near_end(&self) -> bool {
        self.content_extent as u64 <= self.viewport_extent as u64 + self.scroll_offset as u64
    }
}

/// What caused a pagination check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The collection was just rendered
    Initial,
    /// The viewport scrolled; coalesced
    Scroll,
    /// The viewport changed size
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_end() {
        assert!(ScrollMetrics::new(30, 20, 10).near_end());
        assert!(ScrollMetrics::new(10, 20, 0).near_end());
        assert!(!ScrollMetrics::new(31, 20, 10).near_end());
        assert!(ScrollMetrics::new(u32::MAX, u32::MAX, u32::MAX).near_end());
    }
}
