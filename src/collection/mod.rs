//! Collection controller - owns the master list and its projection
//!
//! # Architecture
//!
//! - `filter`: `FilterMode`, `RecencyWindow`, clocks
//! - `projection`: `Projection`, the read-only view shared with pagination and the viewer
//!
//! The controller is the only writer of the projection. Everyone else holds an
//! `Arc<Projection>` snapshot and asks the controller to recompute.

pub mod filter;
pub mod projection;

pub use filter::{Clock, FilterMode, FixedClock, RecencyWindow, SystemClock};
pub use projection::Projection;

use crate::media::MediaItem;
use crate::prefs::PreferenceStore;
use std::sync::Arc;

/// Preference key used when none is configured
pub const DEFAULT_PREFERENCE_KEY: &str = "filter";

/// Settings for the collection controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSettings {
    /// Window used by `FilterMode::MostRecent`
    pub recency_window: RecencyWindow,
    /// Key under which the active mode is persisted
    pub preference_key: String,
    /// Mode used when nothing is persisted yet
    pub default_filter: FilterMode,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            recency_window: RecencyWindow::default(),
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            default_filter: FilterMode::MostLiked,
        }
    }
}

/// Owns the master list and the current filtered/sorted projection
#[derive(Debug)]
pub struct CollectionController<P> {
    master: Arc<[MediaItem]>,
    projection: Arc<Projection>,
    active: FilterMode,
    prefs: P,
    settings: CollectionSettings,
    clock: Box<dyn Clock>,
}

impl<P: PreferenceStore> CollectionController<P> {
    /// Create a controller with an empty collection
    ///
    /// The active mode is read from `prefs`, falling back to the configured default.
    pub fn new(prefs: P, settings: CollectionSettings) -> Self {
        let active = prefs
            .get(&settings.preference_key)
            .map_or_else(|| settings.default_filter.clone(), FilterMode::from);

        Self {
            master: Arc::from(Vec::<MediaItem>::new()),
            projection: Arc::new(Projection::empty()),
            active,
            prefs,
            settings,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the source of "now" used by the recency window
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the master list and rebuild the projection with the active mode
    pub fn load(&mut self, items: Vec<MediaItem>) -> Arc<Projection> {
        log::info!("Loading {} items with filter {}", items.len(), self.active);
        self.master = items.into();
        let mode = self.active.clone();
        self.set_filter(mode, true);
        self.projection()
    }

    /// Switch to `mode`
    ///
    /// Returns `false` without doing anything when `mode` is already active and
    /// `force` is not set. Otherwise rebuilds the projection, persists the mode
    /// and returns `true`; the caller must then reset pagination.
    pub fn set_filter(&mut self, mode: FilterMode, force: bool) -> bool {
        if mode == self.active && !force {
            log::debug!("Filter {mode} already active");
            return false;
        }

        let projection = mode.apply(&self.master, self.settings.recency_window, self.clock.now());
        log::info!(
            "Filter {} selected: {} of {} items",
            mode,
            projection.len(),
            self.master.len()
        );
        self.projection = Arc::new(projection);

        if let Err(e) = self.prefs.set(&self.settings.preference_key, mode.id()) {
            log::warn!("Failed to persist filter {mode}: {e}");
        }
        self.active = mode;
        true
    }

    /// Current projection (read-only snapshot)
    #[must_use]
    pub fn projection(&self) -> Arc<Projection> {
        Arc::clone(&self.projection)
    }

    #[must_use]
    pub const fn active_filter(&self) -> &FilterMode {
        &self.active
    }

    /// Number of items in the master list
    #[must_use]
    pub fn master_len(&self) -> usize {
        self.master.len()
    }

    #[must_use]
    pub const fn prefs(&self) -> &P {
        &self.prefs
    }

    #[must_use]
    pub const fn settings(&self) -> &CollectionSettings {
        &self.settings
    }
}
