//! Filter modes and their predicates/comparators
//!
//! Every mode copies the master order, optionally drops items, then sorts
//! with a stable sort so equal keys keep their load order.

use super::projection::Projection;
use crate::media::MediaItem;
use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Active ordering of the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterMode {
    /// Descending by likes
    #[default]
    MostLiked,
    /// Only items inside the recency window, newest first
    MostRecent,
    /// Descending by comments
    MostDiscussed,
    /// Unrecognized id; the master order passes through untouched
    Unknown(String),
}

impl FilterMode {
    /// All recognized modes, in display order
    pub const KNOWN: [Self; 3] = [Self::MostLiked, Self::MostRecent, Self::MostDiscussed];

    /// Stable id used for persistence
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::MostLiked => "filter-popular",
            Self::MostRecent => "filter-new",
            Self::MostDiscussed => "filter-discussed",
            Self::Unknown(id) => id,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::MostLiked => "Popular",
            Self::MostRecent => "New",
            Self::MostDiscussed => "Discussed",
            Self::Unknown(id) => id,
        }
    }

    /// Build the projection of `master` for this mode
    #[must_use]
    pub fn apply(&self, master: &Arc<[MediaItem]>, window: RecencyWindow, now: DateTime<Utc>) -> Projection {
        let mut order: Vec<usize> = (0..master.len()).collect();

        match self {
            Self::MostLiked => order.sort_by(|&a, &b| descending(master[a].likes, master[b].likes)),
            Self::MostRecent => {
                let cutoff = window.cutoff(now);
                order.retain(|&i| master[i].created_at > cutoff);
                order.sort_by(|&a, &b| descending(master[a].created_at, master[b].created_at));
            }
            Self::MostDiscussed => {
                order.sort_by(|&a, &b| descending(master[a].comments, master[b].comments));
            }
            Self::Unknown(id) => log::debug!("Unknown filter {id:?}, keeping load order"),
        }

        Projection::new(Arc::clone(master), order)
    }
}

fn descending<T: Ord>(a: T, b: T) -> Ordering {
    b.cmp(&a)
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "filter-popular" | "popular" | "liked" => Self::MostLiked,
            "filter-new" | "new" | "recent" => Self::MostRecent,
            "filter-discussed" | "discussed" => Self::MostDiscussed,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl From<String> for FilterMode {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.id().to_string()
    }
}

/// How far back `MostRecent` reaches from "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyWindow {
    Days(u32),
    Months(u32),
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::Months(3)
    }
}

impl RecencyWindow {
    /// Oldest instant still considered recent, exclusive
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let cutoff = match self {
            Self::Days(days) => now.checked_sub_signed(TimeDelta::days(i64::from(days))),
            Self::Months(months) => now.checked_sub_months(Months::new(months)),
        };
        cutoff.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Source of "now" for the recency window
pub trait Clock: fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
