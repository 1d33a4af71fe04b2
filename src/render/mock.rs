//! Recording renderer for testing
//!
//! Remembers every call so tests can assert on what the core asked to display.

use super::{RenderStatus, Renderer, Surface, VisualHandle};
use crate::media::MediaItem;
use std::collections::HashSet;

/// A single call observed by [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Render { url: String, surface: Surface },
    Release(u64),
    Dismiss(Surface),
}

/// Renderer that records calls instead of drawing
///
/// Useful for testing without a terminal
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Calls in the order they were made
    pub calls: Vec<RenderCall>,
    /// Urls that should render as failed
    pub failing: HashSet<String>,
    next_id: u64,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that reports failure for the given urls
    #[must_use]
    pub fn failing<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Urls rendered on the given surface kind, in order
    #[must_use]
    pub fn rendered_on(&self, overlay: bool) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Render { url, surface } if matches!(surface, Surface::Overlay) == overlay => {
                    Some(url.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Url shown by the latest overlay render
    #[must_use]
    pub fn last_overlay(&self) -> Option<&str> {
        self.rendered_on(true).last().copied()
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, item: &MediaItem, surface: Surface) -> VisualHandle {
        self.next_id += 1;
        self.calls.push(RenderCall::Render {
            url: item.url.clone(),
            surface,
        });

        let status = if self.failing.contains(&item.url) {
            RenderStatus::Failed
        } else {
            RenderStatus::Ready
        };
        VisualHandle::new(self.next_id, status)
    }

    fn release(&mut self, handle: VisualHandle) {
        self.calls.push(RenderCall::Release(handle.id()));
    }

    fn dismiss(&mut self, surface: Surface) {
        self.calls.push(RenderCall::Dismiss(surface));
    }
}
