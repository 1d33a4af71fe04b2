//! Synchronization between the viewer and the location channel
//!
//! `LocationSync` owns the channel. The viewer writes through it; observed
//! changes are turned into [`SyncDecision`]s for the gallery to apply.
//!
//! Writes made by the viewer come back as change notifications. A notification
//! is ignored when it is the echo of the sync's own latest write, or when a
//! later write has already superseded it.

use super::channel::LocationChannel;
use super::token::{LocationToken, parse_identifier};

/// What the gallery should do about an observed location change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// The change is our own echo or stale
    Ignore,
    /// Show the item with this identifier (closes if no such item exists)
    Open(String),
    /// No item, or the token is malformed
    Close,
}

/// Sink for tokens written by the viewer
pub trait LocationWriter {
    fn write(&mut self, token: &LocationToken);
}

/// Location channel plus echo suppression
#[derive(Debug)]
pub struct LocationSync<L> {
    channel: L,
    last_written: Option<String>,
}

impl<L: LocationChannel> LocationSync<L> {
    #[must_use]
    pub const fn new(channel: L) -> Self {
        Self {
            channel,
            last_written: None,
        }
    }

    #[must_use]
    pub const fn channel(&self) -> &L {
        &self.channel
    }

    pub const fn channel_mut(&mut self) -> &mut L {
        &mut self.channel
    }

    /// Decision for the channel's current token, ignoring echo suppression
    ///
    /// Used on startup and after the projection changes.
    #[must_use]
    pub fn current(&self) -> SyncDecision {
        interpret(&self.channel.get())
    }

    /// Drain pending notifications and decide what each one means
    pub fn poll(&mut self) -> Vec<SyncDecision> {
        self.channel
            .take_changes()
            .into_iter()
            .map(|observed| self.observe(&observed))
            .filter(|decision| *decision != SyncDecision::Ignore)
            .collect()
    }

    /// Decide what a single observed token means
    pub fn observe(&mut self, observed: &str) -> SyncDecision {
        if self.channel.get() != observed {
            log::debug!("Ignoring superseded location change {observed:?}");
            return SyncDecision::Ignore;
        }
        if self.last_written.as_deref() == Some(observed) {
            log::debug!("Ignoring echo of own location write {observed:?}");
            return SyncDecision::Ignore;
        }

        self.last_written = None;
        interpret(observed)
    }
}

impl<L: LocationChannel> LocationWriter for LocationSync<L> {
    fn write(&mut self, token: &LocationToken) {
        let raw = token.encode();
        self.channel.set(&raw);
        self.last_written = Some(raw);
    }
}

fn interpret(raw: &str) -> SyncDecision {
    parse_identifier(raw).map_or(SyncDecision::Close, SyncDecision::Open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::InMemoryLocation;

    #[test]
    fn test_own_write_is_ignored() {
        let mut sync = LocationSync::new(InMemoryLocation::new());
        sync.write(&LocationToken::item("a"));

        assert!(sync.poll().is_empty());
        assert_eq!(sync.channel().get(), "item/a");
    }

    #[test]
    fn test_superseded_write_is_ignored() {
        let mut sync = LocationSync::new(InMemoryLocation::new());
        sync.write(&LocationToken::item("a"));
        sync.write(&LocationToken::item("b"));

        assert!(sync.poll().is_empty());
    }

    #[test]
    fn test_external_change_opens() {
        let mut sync = LocationSync::new(InMemoryLocation::new());
        sync.write(&LocationToken::item("a"));
        sync.poll();

        sync.channel_mut().push_external("item/b");
        assert_eq!(sync.poll(), vec![SyncDecision::Open("b".into())]);
    }

    #[test]
    fn test_external_change_back_to_last_written_token() {
        let mut sync = LocationSync::new(InMemoryLocation::new());
        sync.write(&LocationToken::item("a"));
        sync.poll();

        sync.channel_mut().push_external("item/b");
        sync.poll();
        sync.channel_mut().push_external("item/a");
        assert_eq!(sync.poll(), vec![SyncDecision::Open("a".into())]);
    }

    #[test]
    fn test_malformed_and_empty_close() {
        let mut sync = LocationSync::new(InMemoryLocation::new());
        sync.channel_mut().push_external("photo/a");
        assert_eq!(sync.poll(), vec![SyncDecision::Close]);

        sync.channel_mut().push_external("");
        assert_eq!(sync.poll(), vec![SyncDecision::Close]);
    }

    #[test]
    fn test_current() {
        let sync = LocationSync::new(InMemoryLocation::starting_at("item/foo"));
        assert_eq!(sync.current(), SyncDecision::Open("foo".into()));
    }
}
