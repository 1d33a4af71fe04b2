//! Filtered-and-sorted view over the master list

use crate::media::MediaItem;
use std::ops::Range;
use std::sync::Arc;

/// Ordered positions into a shared, immutable master list
///
/// Holding a projection never allows mutating the items it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    master: Arc<[MediaItem]>,
    order: Vec<usize>,
}

impl Projection {
    pub(crate) fn new(master: Arc<[MediaItem]>, order: Vec<usize>) -> Self {
        debug_assert!(order.len() <= master.len());
        debug_assert!(order.iter().all(|&i| i < master.len()));
        Self { master, order }
    }

    /// Projection over nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            master: Arc::from(Vec::<MediaItem>::new()),
            order: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Item shown at `position`
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&MediaItem> {
        self.order.get(position).map(|&i| &self.master[i])
    }

    /// Positions into the master list, in display order
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    /// Position of the item with the given identifier
    #[must_use]
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.iter().position(|item| item.identifier() == identifier)
    }

    /// Items in display order
    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> + '_ {
        self.order.iter().map(|&i| &self.master[i])
    }

    /// `(position, item)` pairs inside `range`, clamped to the projection
    pub fn window(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &MediaItem)> + '_ {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (start..end).map(move |pos| (pos, &self.master[self.order[pos]]))
    }

    /// Size of the master list this projection was derived from
    #[must_use]
    pub fn master_len(&self) -> usize {
        self.master.len()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample() -> Projection {
        let now = Utc::now();
        let master: Arc<[MediaItem]> = vec![
            MediaItem::new("a", 0, 0, now),
            MediaItem::new("b", 0, 0, now),
            MediaItem::new("c", 0, 0, now),
        ]
        .into();
        Projection::new(master, vec![2, 0])
    }

    #[test]
    fn test_projection_lookup() {
        let projection = sample();
        assert_eq!(projection.len(), 2);
        assert_eq!(projection.master_len(), 3);
        assert_eq!(projection.get(0).map(|i| i.url.as_str()), Some("c"));
        assert_eq!(projection.position_of("a"), Some(1));
        assert_eq!(projection.position_of("b"), None);
        assert!(projection.get(2).is_none());
    }

    #[test]
    fn test_window_is_clamped() {
        let projection = sample();
        let urls: Vec<_> = projection.window(1..10).map(|(pos, item)| (pos, item.url.as_str())).collect();
        assert_eq!(urls, vec![(1, "a")]);
        assert_eq!(projection.window(5..9).count(), 0);
    }

    #[test]
    fn test_empty() {
        let projection = Projection::empty();
        assert!(projection.is_empty());
        assert_eq!(projection.iter().count(), 0);
    }
}
