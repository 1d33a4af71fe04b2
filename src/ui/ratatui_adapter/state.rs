//! Grid cursor and viewport for the ratatui frontend

use crate::pagination::ScrollMetrics;

/// Cursor over the revealed tiles plus the visible window onto them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    /// Selected tile (projection position)
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Number of rows the list area can show
    pub visible_height: usize,
    /// Number of revealed tiles
    pub len: usize,
}

impl GridState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the number of revealed tiles, keeping the cursor in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.adjust_scroll();
    }

    /// Update the visible height after a layout change
    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.adjust_scroll();
    }

    /// Back to the first tile (after the projection changed)
    pub const fn reset(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Move cursor up one row
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Move cursor down one row
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
        self.adjust_scroll();
    }

    /// Move cursor one screen down
    pub fn page_down(&mut self) {
        let max_cursor = self.len.saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height.max(1)).min(max_cursor);
        self.adjust_scroll();
    }

    /// Move cursor one screen up
    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height.max(1));
        self.adjust_scroll();
    }

    /// Jump to first tile
    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last revealed tile
    pub fn jump_to_end(&mut self) {
        self.cursor = self.len.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Scroll geometry in rows, as the pagination engine expects it
    #[must_use]
    pub fn metrics(&self) -> ScrollMetrics {
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        ScrollMetrics::new(clamp(self.len), clamp(self.visible_height), clamp(self.scroll_offset))
    }

    fn adjust_scroll(&mut self) {
        if self.visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor + 1 - self.visible_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(len: usize, height: usize) -> GridState {
        let mut state = GridState::new();
        state.set_visible_height(height);
        state.set_len(len);
        state
    }

    #[test]
    fn test_cursor_scrolls_viewport() {
        let mut state = state(12, 5);
        for _ in 0..6 {
            state.cursor_down();
        }
        assert_eq!(state.cursor, 6);
        assert_eq!(state.scroll_offset, 2);

        state.jump_to_start();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_cursor_stays_in_range() {
        let mut state = state(3, 5);
        state.page_down();
        assert_eq!(state.cursor, 2);
        state.cursor_down();
        assert_eq!(state.cursor, 2);

        state.set_len(1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_metrics_near_end() {
        let mut state = state(12, 5);
        assert!(!state.metrics().near_end());

        state.jump_to_end();
        assert_eq!(state.scroll_offset, 7);
        assert!(state.metrics().near_end());

        let short = self::state(3, 10);
        assert!(short.metrics().near_end());
    }
}
