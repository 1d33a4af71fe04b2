//! Overlay viewer state machine
//!
//! ```text
//!            open(i)                 next / prev (cyclic)
//!   ┌────────┐ ───────→ ┌──────────────┐ ──┐
//!   │ Closed │          │ Open { i }   │   │
//!   └────────┘ ←─────── └──────────────┘ ←─┘
//!              close()
//! ```
//!
//! Entering `Open` acquires keyboard and pointer subscriptions; they live
//! inside the open state and are released on every way out of it. Location
//! changes are watched by the owning gallery for its whole lifetime. Each
//! successful transition renders the current item on the overlay surface and
//! writes its location token.

pub mod subscription;

pub use subscription::{Subscription, SubscriptionRegistry, Topic};

use crate::collection::Projection;
use crate::keybinds::{Key, KeyBindings, ViewerAction};
use crate::location::{LocationToken, LocationWriter};
use crate::media::MediaItem;
use crate::render::{Renderer, Surface};
use std::sync::Arc;

/// Collaborators a transition talks to
pub struct ViewerPorts<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub location: &'a mut dyn LocationWriter,
}

impl<'a> ViewerPorts<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, location: &'a mut dyn LocationWriter) -> Self {
        Self { renderer, location }
    }
}

/// Clickable parts of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// The displayed media; advances to the next item
    Image,
    /// The close button
    CloseButton,
}

#[derive(Debug)]
struct OpenState {
    current_index: usize,
    _subscriptions: [Subscription; 2],
}

#[derive(Debug, Default)]
enum ViewerState {
    #[default]
    Closed,
    Open(OpenState),
}

/// Full-view overlay with cyclic keyboard navigation
#[derive(Debug)]
pub struct OverlayViewer {
    items: Arc<Projection>,
    state: ViewerState,
    registry: SubscriptionRegistry,
    bindings: KeyBindings,
}

impl OverlayViewer {
    #[must_use]
    pub fn new(registry: SubscriptionRegistry, bindings: KeyBindings) -> Self {
        Self {
            items: Arc::new(Projection::empty()),
            state: ViewerState::Closed,
            registry,
            bindings,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    /// Index of the shown item while open
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        match &self.state {
            ViewerState::Open(open) => Some(open.current_index),
            ViewerState::Closed => None,
        }
    }

    /// The shown item while open
    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current_index().and_then(|i| self.items.get(i))
    }

    #[must_use]
    pub fn items(&self) -> &Arc<Projection> {
        &self.items
    }

    #[must_use]
    pub const fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Show the item at `index`
    ///
    /// Returns `false` and changes nothing if `index` is out of range (which
    /// includes every index of an empty collection).
    pub fn open(&mut self, index: usize, ports: &mut ViewerPorts<'_>) -> bool {
        if index >= self.items.len() {
            log::debug!("Ignoring open({index}) over {} items", self.items.len());
            return false;
        }

        match &mut self.state {
            ViewerState::Open(open) => open.current_index = index,
            ViewerState::Closed => {
                log::debug!("Viewer opened at {index}");
                self.state = ViewerState::Open(OpenState {
                    current_index: index,
                    _subscriptions: [
                        self.registry.subscribe(Topic::Keyboard),
                        self.registry.subscribe(Topic::Pointer),
                    ],
                });
            }
        }

        self.show(index, ports);
        true
    }

    /// Return to `Closed` and clear the location token
    ///
    /// Returns `false` if the viewer was already closed.
    pub fn close(&mut self, ports: &mut ViewerPorts<'_>) -> bool {
        if matches!(std::mem::take(&mut self.state), ViewerState::Closed) {
            return false;
        }

        log::debug!("Viewer closed");
        ports.renderer.dismiss(Surface::Overlay);
        ports.location.write(&LocationToken::Base);
        true
    }

    /// Show the next item, wrapping from the last to the first
    pub fn next(&mut self, ports: &mut ViewerPorts<'_>) -> bool {
        let len = self.items.len();
        self.step(ports, |i| if i + 1 == len { 0 } else { i + 1 })
    }

    /// Show the previous item, wrapping from the first to the last
    pub fn prev(&mut self, ports: &mut ViewerPorts<'_>) -> bool {
        let len = self.items.len();
        self.step(ports, |i| if i == 0 { len - 1 } else { i - 1 })
    }

    /// Apply the action bound to `key`
    ///
    /// Nothing is bound while closed.
    pub fn handle_key(&mut self, key: Key, ports: &mut ViewerPorts<'_>) -> Option<ViewerAction> {
        if !self.is_open() || !self.registry.is_active(Topic::Keyboard) {
            return None;
        }

        let action = self.bindings.action(key)?;
        match action {
            ViewerAction::Close => self.close(ports),
            ViewerAction::Next => self.next(ports),
            ViewerAction::Prev => self.prev(ports),
        };
        Some(action)
    }

    /// Handle a click on the overlay
    pub fn click(&mut self, target: OverlayTarget, ports: &mut ViewerPorts<'_>) -> bool {
        if !self.is_open() || !self.registry.is_active(Topic::Pointer) {
            return false;
        }

        match target {
            OverlayTarget::Image => self.next(ports),
            OverlayTarget::CloseButton => self.close(ports),
        }
    }

    /// Replace the items being navigated
    ///
    /// While open, the viewer keeps showing the same item if the new items
    /// still contain it, and closes otherwise.
    pub fn set_items(&mut self, items: Arc<Projection>, ports: &mut ViewerPorts<'_>) {
        let shown = self.current_item().map(|item| item.url.clone());
        self.items = items;

        let Some(url) = shown else {
            return;
        };
        match self.items.position_of(&url) {
            Some(index) => {
                if let ViewerState::Open(open) = &mut self.state {
                    open.current_index = index;
                }
            }
            None => {
                log::debug!("Shown item {url} left the collection");
                self.close(ports);
            }
        }
    }

    fn step(&mut self, ports: &mut ViewerPorts<'_>, advance: impl FnOnce(usize) -> usize) -> bool {
        let ViewerState::Open(open) = &mut self.state else {
            return false;
        };

        open.current_index = advance(open.current_index);
        let index = open.current_index;
        self.show(index, ports);
        true
    }

    fn show(&self, index: usize, ports: &mut ViewerPorts<'_>) {
        if let Some(item) = self.items.get(index) {
            ports.renderer.render(item, Surface::Overlay);
            ports.location.write(&LocationToken::item(item.identifier()));
        }
    }
}
