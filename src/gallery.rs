//! The gallery context
//!
//! [`Gallery`] owns every component and the host-supplied collaborators. The
//! host feeds it [`GalleryEvent`]s; each event runs to completion, after which
//! queued location changes are drained and applied.
//!
//! ```text
//! host ──GalleryEvent──→ Gallery::handle
//!                          ├─ CollectionController (filter, persistence)
//!                          ├─ PaginationEngine     (pages, scroll coalescing)
//!                          ├─ OverlayViewer        (open/close/next/prev)
//!                          └─ LocationSync         (token in, token out)
//! ```

use crate::collection::{Clock, CollectionController, CollectionSettings, FilterMode, Projection};
use crate::config::GalleryConfig;
use crate::keybinds::{Key, KeyBindings, ViewerAction};
use crate::location::{LocationChannel, LocationSync, SyncDecision};
use crate::media::{DataSource, LoadError, MediaItem};
use crate::pagination::{
    Coalescer, DEFAULT_COALESCE_WINDOW, DEFAULT_PAGE_SIZE, Page, PaginationEngine, ScrollMetrics,
    Trigger,
};
use crate::prefs::PreferenceStore;
use crate::render::Renderer;
use crate::viewer::{OverlayTarget, OverlayViewer, Subscription, SubscriptionRegistry, Topic, ViewerPorts};
use std::sync::Arc;

/// Input delivered by the host
#[derive(Debug)]
pub enum GalleryEvent {
    /// The one-shot fetch finished
    Loaded(Result<Vec<MediaItem>, LoadError>),
    /// A filter control was activated
    FilterSelected(FilterMode),
    /// The grid was laid out after a reset; checked immediately
    Rendered { metrics: ScrollMetrics },
    /// The viewport scrolled; coalesced
    Scrolled { metrics: ScrollMetrics, now: u64 },
    /// The viewport changed size; checked immediately
    Resized { metrics: ScrollMetrics },
    /// Time passed; fires a due scroll check
    Tick { now: u64 },
    /// A grid tile was clicked
    TileClicked(usize),
    /// Part of the open overlay was clicked
    OverlayClicked(OverlayTarget),
    /// A key was pressed
    Key(Key),
    /// The location channel has pending changes
    LocationChanged,
}

/// Outcome of the data fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing loaded yet
    #[default]
    Pending,
    /// Loaded this many items
    Loaded(usize),
    /// The fetch failed; the collection stays empty
    Failed(String),
}

/// Construction settings for a [`Gallery`]
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    pub page_size: usize,
    pub coalesce_window: u64,
    pub collection: CollectionSettings,
    pub bindings: KeyBindings,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            coalesce_window: DEFAULT_COALESCE_WINDOW,
            collection: CollectionSettings::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl From<&GalleryConfig> for GalleryOptions {
    fn from(config: &GalleryConfig) -> Self {
        Self {
            page_size: config.page_size,
            coalesce_window: config.coalesce_window_ms,
            collection: config.collection_settings(),
            bindings: config.keybinds.bindings(),
        }
    }
}

/// Explicitly owned gallery context
#[derive(Debug)]
pub struct Gallery<R, P, L> {
    controller: CollectionController<P>,
    engine: PaginationEngine,
    viewer: OverlayViewer,
    sync: LocationSync<L>,
    renderer: R,
    registry: SubscriptionRegistry,
    scroll: Coalescer<ScrollMetrics>,
    load_state: LoadState,
    _location_watch: Subscription,
}

impl<R, P, L> Gallery<R, P, L>
where
    R: Renderer,
    P: PreferenceStore,
    L: LocationChannel,
{
    pub fn new(renderer: R, prefs: P, channel: L, options: GalleryOptions) -> Self {
        let registry = SubscriptionRegistry::new();
        let location_watch = registry.subscribe(Topic::Location);

        Self {
            controller: CollectionController::new(prefs, options.collection),
            engine: PaginationEngine::new(options.page_size),
            viewer: OverlayViewer::new(registry.clone(), options.bindings),
            sync: LocationSync::new(channel),
            renderer,
            registry,
            scroll: Coalescer::new(options.coalesce_window),
            load_state: LoadState::Pending,
            _location_watch: location_watch,
        }
    }

    /// Replace the clock used for the recency window
    #[must_use]
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self {
            controller: self.controller.with_clock(clock),
            ..self
        }
    }

    /// Fetch from `source` and deliver the result
    pub fn load(&mut self, source: impl DataSource) {
        self.handle(GalleryEvent::Loaded(source.fetch()));
    }

    /// Process one event, then apply queued location changes
    pub fn handle(&mut self, event: GalleryEvent) {
        match event {
            GalleryEvent::Loaded(result) => self.on_loaded(result),
            GalleryEvent::FilterSelected(mode) => self.select_filter(mode),
            GalleryEvent::Rendered { metrics } => {
                self.check(Trigger::Initial, metrics);
            }
            GalleryEvent::Resized { metrics } => {
                self.check(Trigger::Resize, metrics);
            }
            GalleryEvent::Scrolled { metrics, now } => {
                if self.scroll.signal(now, metrics) {
                    log::trace!("Scroll check rescheduled");
                }
            }
            GalleryEvent::Tick { now } => {
                if let Some(metrics) = self.scroll.poll(now) {
                    self.check(Trigger::Scroll, metrics);
                }
            }
            GalleryEvent::TileClicked(position) => self.open_tile(position),
            GalleryEvent::OverlayClicked(target) => {
                let mut ports = ViewerPorts::new(&mut self.renderer, &mut self.sync);
                self.viewer.click(target, &mut ports);
            }
            GalleryEvent::Key(key) => {
                self.press(key);
            }
            GalleryEvent::LocationChanged => {}
        }

        self.pump_location();
    }

    /// Apply `key` to the overlay, returning the action it triggered
    fn press(&mut self, key: Key) -> Option<ViewerAction> {
        let mut ports = ViewerPorts::new(&mut self.renderer, &mut self.sync);
        self.viewer.handle_key(key, &mut ports)
    }

    /// Check whether another page should be revealed
    ///
    /// Reveals at most one page per call.
    pub fn check(&mut self, trigger: Trigger, metrics: ScrollMetrics) -> Option<Page> {
        if !metrics.near_end() {
            return None;
        }
        log::trace!("{trigger:?} check near end of content");
        self.engine.next_page(&mut self.renderer)
    }

    fn on_loaded(&mut self, result: Result<Vec<MediaItem>, LoadError>) {
        match result {
            Ok(items) => {
                let count = items.len();
                let projection = self.controller.load(items);
                self.load_state = LoadState::Loaded(count);
                self.refresh(projection);
            }
            Err(e) => {
                log::warn!("Failed to load collection: {e}");
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    fn select_filter(&mut self, mode: FilterMode) {
        if self.controller.set_filter(mode, false) {
            self.refresh(self.controller.projection());
        }
    }

    /// Reset pagination and the viewer onto a new projection, then re-read
    /// the location token against it
    fn refresh(&mut self, projection: Arc<Projection>) {
        self.scroll.cancel();
        self.engine.reset(Arc::clone(&projection), &mut self.renderer);

        let mut ports = ViewerPorts::new(&mut self.renderer, &mut self.sync);
        self.viewer.set_items(projection, &mut ports);

        let decision = self.sync.current();
        self.apply(decision);
    }

    fn open_tile(&mut self, position: usize) {
        let Some(tile) = self.engine.tile(position) else {
            log::debug!("Ignoring click on unrevealed position {position}");
            return;
        };
        if tile.handle.is_failed() {
            log::debug!("Ignoring click on failed tile {position}");
            return;
        }

        let mut ports = ViewerPorts::new(&mut self.renderer, &mut self.sync);
        self.viewer.open(position, &mut ports);
    }

    fn pump_location(&mut self) {
        for decision in self.sync.poll() {
            self.apply(decision);
        }
    }

    fn apply(&mut self, decision: SyncDecision) {
        let mut ports = ViewerPorts::new(&mut self.renderer, &mut self.sync);
        match decision {
            SyncDecision::Ignore => {}
            SyncDecision::Open(identifier) => match self.viewer.items().position_of(&identifier) {
                Some(position) => {
                    self.viewer.open(position, &mut ports);
                }
                None => {
                    log::debug!("No item {identifier:?} in the current projection");
                    self.viewer.close(&mut ports);
                }
            },
            SyncDecision::Close => {
                self.viewer.close(&mut ports);
            }
        }
    }

    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Current projection
    #[must_use]
    pub fn projection(&self) -> Arc<Projection> {
        self.controller.projection()
    }

    #[must_use]
    pub const fn active_filter(&self) -> &FilterMode {
        self.controller.active_filter()
    }

    #[must_use]
    pub const fn controller(&self) -> &CollectionController<P> {
        &self.controller
    }

    #[must_use]
    pub const fn engine(&self) -> &PaginationEngine {
        &self.engine
    }

    #[must_use]
    pub const fn viewer(&self) -> &OverlayViewer {
        &self.viewer
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        self.sync.channel()
    }

    /// The location channel, for simulating external navigation
    ///
    /// Follow changes with [`GalleryEvent::LocationChanged`].
    pub const fn location_mut(&mut self) -> &mut L {
        self.sync.channel_mut()
    }

    #[must_use]
    pub const fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// When the pending scroll check is due, if one is pending
    #[must_use]
    pub fn scroll_due(&self) -> Option<u64> {
        self.scroll.due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::FixedClock;
    use crate::location::InMemoryLocation;
    use crate::prefs::MemoryPreferences;
    use crate::render::{RecordingRenderer, RenderCall, Surface};
    use crate::testing::{fixed_now, items_with_likes, sample_items};

    type TestGallery = Gallery<RecordingRenderer, MemoryPreferences, InMemoryLocation>;

    fn gallery(renderer: RecordingRenderer, channel: InMemoryLocation, page_size: usize) -> TestGallery {
        let options = GalleryOptions {
            page_size,
            ..GalleryOptions::default()
        };
        Gallery::new(renderer, MemoryPreferences::new(), channel, options).with_clock(FixedClock(fixed_now()))
    }

    fn loaded(items: Vec<MediaItem>, page_size: usize) -> TestGallery {
        let mut gallery = gallery(RecordingRenderer::new(), InMemoryLocation::new(), page_size);
        gallery.load(items);
        gallery
    }

    #[test]
    fn test_load_renders_first_page() {
        let gallery = loaded(items_with_likes(&[1, 2, 3, 4, 5]), 2);

        assert_eq!(gallery.load_state(), &LoadState::Loaded(5));
        assert_eq!(gallery.renderer().rendered_on(false), vec!["item-4", "item-3"]);
        assert!(!gallery.viewer().is_open());
    }

    #[test]
    fn test_load_failure_is_recorded() {
        let mut gallery = gallery(RecordingRenderer::new(), InMemoryLocation::new(), 2);
        let failed: Result<Vec<MediaItem>, LoadError> = Err(LoadError::InvalidDate {
            url: "a.jpg".into(),
            date: "yesterday".into(),
        });
        gallery.load(failed);

        assert!(matches!(gallery.load_state(), LoadState::Failed(reason) if reason.contains("yesterday")));
        assert!(gallery.projection().is_empty());
        assert!(gallery.check(Trigger::Initial, ScrollMetrics::new(0, 10, 0)).is_none());
        assert!(gallery.renderer().calls.is_empty());
    }

    #[test]
    fn test_scroll_is_coalesced() {
        let mut gallery = loaded(items_with_likes(&[1; 10]), 2);
        let bottom = ScrollMetrics::new(100, 50, 50);

        for now in [0, 10, 20, 30, 40] {
            gallery.handle(GalleryEvent::Scrolled { metrics: bottom, now });
        }
        gallery.handle(GalleryEvent::Tick { now: 139 });
        assert_eq!(gallery.engine().page_index(), 0);

        gallery.handle(GalleryEvent::Tick { now: 140 });
        assert_eq!(gallery.engine().page_index(), 1);
        gallery.handle(GalleryEvent::Tick { now: 500 });
        assert_eq!(gallery.engine().page_index(), 1);
    }

    #[test]
    fn test_scroll_away_from_end_reveals_nothing() {
        let mut gallery = loaded(items_with_likes(&[1; 10]), 2);
        gallery.handle(GalleryEvent::Scrolled {
            metrics: ScrollMetrics::new(100, 50, 10),
            now: 0,
        });
        gallery.handle(GalleryEvent::Tick { now: 100 });
        assert_eq!(gallery.engine().page_index(), 0);
    }

    #[test]
    fn test_resize_checks_immediately() {
        let mut gallery = loaded(items_with_likes(&[1; 10]), 2);
        gallery.handle(GalleryEvent::Resized {
            metrics: ScrollMetrics::new(20, 40, 0),
        });
        assert_eq!(gallery.engine().page_index(), 1);
    }

    #[test]
    fn test_filter_change_resets_pagination() {
        let mut gallery = loaded(sample_items(), 2);
        gallery.handle(GalleryEvent::Rendered {
            metrics: ScrollMetrics::new(10, 10, 0),
        });
        assert_eq!(gallery.engine().page_index(), 1);

        gallery.handle(GalleryEvent::FilterSelected(FilterMode::MostRecent));
        assert_eq!(gallery.engine().page_index(), 0);
        assert_eq!(gallery.active_filter(), &FilterMode::MostRecent);
        assert_eq!(gallery.controller().prefs().get("filter").as_deref(), Some("filter-new"));
    }

    #[test]
    fn test_same_filter_does_not_reset() {
        let mut gallery = loaded(sample_items(), 2);
        gallery.renderer_mut().clear();

        gallery.handle(GalleryEvent::FilterSelected(FilterMode::MostLiked));
        assert!(gallery.renderer().calls.is_empty());
    }

    #[test]
    fn test_tile_click_opens_viewer() {
        let mut gallery = loaded(items_with_likes(&[1, 2, 3]), 12);
        gallery.handle(GalleryEvent::TileClicked(1));

        assert_eq!(gallery.viewer().current_index(), Some(1));
        assert_eq!(gallery.location().get(), "item/item-1");
    }

    #[test]
    fn test_failed_and_unrevealed_tiles_ignore_clicks() {
        let renderer = RecordingRenderer::failing(["item-0"]);
        let mut gallery = gallery(renderer, InMemoryLocation::new(), 2);
        gallery.load(items_with_likes(&[3, 2, 1]));

        gallery.handle(GalleryEvent::TileClicked(0));
        assert!(!gallery.viewer().is_open());

        gallery.handle(GalleryEvent::TileClicked(2));
        assert!(!gallery.viewer().is_open());
    }

    #[test]
    fn test_keys_drive_viewer() {
        let mut gallery = loaded(items_with_likes(&[3, 2, 1]), 12);
        gallery.handle(GalleryEvent::TileClicked(2));
        gallery.handle(GalleryEvent::Key(Key::Right));
        assert_eq!(gallery.viewer().current_index(), Some(0));

        gallery.handle(GalleryEvent::Key(Key::Escape));
        assert!(!gallery.viewer().is_open());
        assert_eq!(gallery.location().get(), "");
        assert!(gallery.renderer().calls.contains(&RenderCall::Dismiss(Surface::Overlay)));
    }

    #[test]
    fn test_external_location_change_opens_item() {
        let mut gallery = loaded(items_with_likes(&[3, 2, 1]), 12);
        gallery.location_mut().push_external("item/item-2");
        gallery.handle(GalleryEvent::LocationChanged);

        assert_eq!(gallery.viewer().current_index(), Some(2));
    }

    #[test]
    fn test_location_is_watched_by_the_gallery_only() {
        let mut gallery = loaded(items_with_likes(&[3, 2, 1]), 12);
        assert_eq!(gallery.registry().count(Topic::Location), 1);

        gallery.handle(GalleryEvent::TileClicked(0));
        assert_eq!(gallery.registry().count(Topic::Location), 1);
        assert!(gallery.registry().is_active(Topic::Keyboard));

        gallery.handle(GalleryEvent::Key(Key::Escape));
        assert_eq!(gallery.registry().count(Topic::Location), 1);
        assert!(!gallery.registry().is_active(Topic::Keyboard));

        gallery.location_mut().push_external("item/item-1");
        gallery.handle(GalleryEvent::LocationChanged);
        assert_eq!(gallery.viewer().current_index(), Some(1));
    }

    #[test]
    fn test_options_from_config() {
        let config = GalleryConfig {
            page_size: 3,
            coalesce_window_ms: 250,
            ..GalleryConfig::default()
        };
        let options = GalleryOptions::from(&config);
        assert_eq!(options.page_size, 3);
        assert_eq!(options.coalesce_window, 250);
        assert_eq!(options.bindings.action(Key::Escape), Some(ViewerAction::Close));
    }
}
