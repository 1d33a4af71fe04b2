//! Terminal-side implementation of the `Renderer` capability
//!
//! Rendering here means recording what each surface shows; the frame is drawn
//! from this state on the next loop iteration.

use crate::media::MediaItem;
use crate::render::{RenderStatus, Renderer, Surface, VisualHandle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What a grid tile or the overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub handle: VisualHandle,
    pub item: MediaItem,
}

impl Shown {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.handle.is_failed()
    }
}

/// Renderer that keeps the displayed state for the ratatui frontend
///
/// Items whose url is a local path are checked on disk; a missing file
/// renders as failed. Remote urls always render.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    media_root: Option<PathBuf>,
    tiles: BTreeMap<usize, Shown>,
    overlay: Option<Shown>,
    next_id: u64,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative local urls against `root`
    #[must_use]
    pub fn with_media_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.media_root = Some(root.into());
        self
    }

    /// Grid tiles by projection position
    #[must_use]
    pub const fn tiles(&self) -> &BTreeMap<usize, Shown> {
        &self.tiles
    }

    #[must_use]
    pub const fn overlay(&self) -> Option<&Shown> {
        self.overlay.as_ref()
    }

    fn status_of(&self, url: &str) -> RenderStatus {
        if is_remote(url) {
            return RenderStatus::Ready;
        }

        let path = Path::new(url);
        let path = match &self.media_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        };

        if path.exists() {
            RenderStatus::Ready
        } else {
            log::debug!("Media file {} is missing", path.display());
            RenderStatus::Failed
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, item: &MediaItem, surface: Surface) -> VisualHandle {
        self.next_id += 1;
        let handle = VisualHandle::new(self.next_id, self.status_of(&item.url));
        let shown = Shown {
            handle,
            item: item.clone(),
        };

        match surface {
            Surface::Grid(position) => {
                self.tiles.insert(position, shown);
            }
            Surface::Overlay => self.overlay = Some(shown),
        }
        handle
    }

    fn release(&mut self, handle: VisualHandle) {
        self.tiles.retain(|_, shown| shown.handle != handle);
    }

    fn dismiss(&mut self, surface: Surface) {
        match surface {
            Surface::Grid(position) => {
                self.tiles.remove(&position);
            }
            Surface::Overlay => self.overlay = None,
        }
    }
}

fn is_remote(url: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}
