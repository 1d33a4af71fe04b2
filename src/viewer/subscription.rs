//! Scoped input subscriptions
//!
//! A [`Subscription`] is held for as long as its owner wants input on a topic
//! and unsubscribes when dropped. The viewer keeps its subscriptions inside
//! its open state, so every way of leaving that state releases them.
//!
//! Everything runs on one thread; the registry is shared with `Rc`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Kind of input a subscriber listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Key presses
    Keyboard,
    /// Clicks on the overlay (image, close button)
    Pointer,
    /// Location channel changes
    Location,
}

type Counts = RefCell<HashMap<Topic, usize>>;

/// Tracks live subscriptions per topic
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRegistry {
    counts: Rc<Counts>,
}

impl SubscriptionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening to `topic` until the returned handle is dropped
    #[must_use = "dropping the handle unsubscribes immediately"]
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        *self.counts.borrow_mut().entry(topic).or_insert(0) += 1;
        Subscription {
            topic,
            counts: Rc::downgrade(&self.counts),
        }
    }

    /// Whether anyone listens to `topic`
    #[must_use]
    pub fn is_active(&self, topic: Topic) -> bool {
        self.count(topic) > 0
    }

    /// Number of live subscriptions on `topic`
    #[must_use]
    pub fn count(&self, topic: Topic) -> usize {
        self.counts.borrow().get(&topic).copied().unwrap_or(0)
    }
}

/// Live subscription; unsubscribes on drop
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    counts: Weak<Counts>,
}

impl Subscription {
    #[must_use]
    pub const fn topic(&self) -> Topic {
        self.topic
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(counts) = self.counts.upgrade() else {
            return;
        };
        let mut counts = counts.borrow_mut();
        if let Some(count) = counts.get_mut(&self.topic) {
            *count = count.saturating_sub(1);
        }
    }
}
