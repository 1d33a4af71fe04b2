//! Testing utilities for gallerist
//!
//! Fixture collections and a fixed clock for deterministic tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::media::MediaItem;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// The "now" every fixture is dated against
///
/// # Panics
/// Never; the date is a valid constant.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 6, 15, 12, 0, 0).unwrap()
}

/// Items named `item-{i}` in load order with the given like counts
///
/// Item `i` has `i` comments and was created `i + 1` hours before
/// [`fixed_now`], so every item is recent.
#[must_use]
pub fn items_with_likes(likes: &[i64]) -> Vec<MediaItem> {
    likes
        .iter()
        .enumerate()
        .map(|(i, &likes)| {
            let age = Duration::hours(i as i64 + 1);
            MediaItem::new(format!("item-{i}"), likes, i as i64, fixed_now() - age)
        })
        .collect()
}

/// A small collection with mixed counts and ages
///
/// `b.jpg` and `d.jpg` tie on likes; `b.jpg` and `e.jpg` are older than the
/// default recency window.
#[must_use]
pub fn sample_items() -> Vec<MediaItem> {
    let ago = |days: i64| fixed_now() - Duration::days(days);
    vec![
        MediaItem::new("a.jpg", 10, 2, ago(10)),
        MediaItem::new("b.jpg", 25, 7, ago(200)),
        MediaItem::new("c.jpg", 3, 15, ago(40)),
        MediaItem::new("d.jpg", 25, 0, ago(1)),
        MediaItem::new("e.jpg", 0, 4, ago(400)),
    ]
}
