//! Location channel capability and an in-memory implementation
//!
//! A location channel holds the shareable token. Writing a token queues a
//! change notification exactly like an externally observed change would;
//! consumers drain notifications with [`LocationChannel::take_changes`]
//! instead of being called back, so a write can never re-enter the code that
//! performed it.

use std::collections::VecDeque;

/// Gettable/settable token with change notifications
pub trait LocationChannel {
    /// Current raw token
    fn get(&self) -> String;

    /// Replace the token
    ///
    /// Must not grow history by more than one entry per call and must not
    /// notify when `token` equals the current token.
    fn set(&mut self, token: &str);

    /// Drain change notifications observed since the last call, oldest first
    fn take_changes(&mut self) -> Vec<String>;
}

/// Location channel kept in memory
///
/// Mirrors a browser fragment: every effective change appends one history
/// entry and queues one notification, whoever caused it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocation {
    current: String,
    history: Vec<String>,
    pending: VecDeque<String>,
}

impl InMemoryLocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `token` without queuing a notification (a shared link being opened)
    #[must_use]
    pub fn starting_at(token: impl Into<String>) -> Self {
        let current = token.into();
        Self {
            history: vec![current.clone()],
            current,
            pending: VecDeque::new(),
        }
    }

    /// Simulate a change made outside the gallery (address bar edit, pasted link)
    pub fn push_external(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.history.push(token.clone());
        self.current = token.clone();
        self.pending.push_back(token);
    }

    /// Step back one history entry, notifying like a browser "back"
    ///
    /// Returns `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }
        self.history.pop();
        let previous = self.history.last().cloned().unwrap_or_default();
        self.current = previous.clone();
        self.pending.push_back(previous);
        true
    }

    /// Every token this channel has held, oldest first
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl LocationChannel for InMemoryLocation {
    fn get(&self) -> String {
        self.current.clone()
    }

    fn set(&mut self, token: &str) {
        if token == self.current {
            return;
        }
        self.current = token.to_string();
        self.history.push(self.current.clone());
        self.pending.push_back(self.current.clone());
    }

    fn take_changes(&mut self) -> Vec<String> {
        self.pending.drain(..).collect()
    }
}

impl<L: LocationChannel + ?Sized> LocationChannel for Box<L> {
    fn get(&self) -> String {
        (**self).get()
    }

    fn set(&mut self, token: &str) {
        (**self).set(token);
    }

    fn take_changes(&mut self) -> Vec<String> {
        (**self).take_changes()
    }
}
