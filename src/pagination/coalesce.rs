//! Trailing-edge coalescing of trigger signals
//!
//! A signal schedules a call `window` time units later. A new signal before
//! that moment cancels the pending call and schedules a fresh one carrying the
//! new payload; there is never more than one pending call.
//!
//! Time is an explicit monotonic `u64` supplied by the caller (milliseconds in
//! the terminal frontend), so behavior is deterministic under test.

/// Default coalescing window
pub const DEFAULT_COALESCE_WINDOW: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    due: u64,
    payload: T,
}

/// Collapses bursts of signals into one deferred call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coalescer<T> {
    window: u64,
    pending: Option<Pending<T>>,
}

impl<T> Coalescer<T> {
    #[must_use]
    pub const fn new(window: u64) -> Self {
        Self { window, pending: None }
    }

    /// Record a signal at `now`, replacing any pending call
    ///
    /// Returns `true` if a pending call was cancelled.
    pub fn signal(&mut self, now: u64, payload: T) -> bool {
        let cancelled = self.pending.is_some();
        self.pending = Some(Pending {
            due: now.saturating_add(self.window),
            payload,
        });
        cancelled
    }

    /// Take the pending payload if its call is due at `now`
    pub fn poll(&mut self, now: u64) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }

    /// When the pending call fires, if any
    #[must_use]
    pub fn due(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Drop the pending call
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_COALESCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_window() {
        let mut coalescer = Coalescer::new(100);
        assert!(!coalescer.signal(0, "a"));

        assert_eq!(coalescer.poll(99), None);
        assert_eq!(coalescer.poll(100), Some("a"));
        assert_eq!(coalescer.poll(500), None);
    }

    #[test]
    fn test_burst_collapses_to_latest() {
        let mut coalescer = Coalescer::new(100);
        coalescer.signal(0, 1);
        assert!(coalescer.signal(40, 2));
        assert!(coalescer.signal(90, 3));

        // The first signal's deadline has passed but it was cancelled
        assert_eq!(coalescer.poll(150), None);
        assert_eq!(coalescer.due(), Some(190));
        assert_eq!(coalescer.poll(190), Some(3));
        assert_eq!(coalescer.due(), None);
    }

    #[test]
    fn test_cancel() {
        let mut coalescer = Coalescer::new(10);
        coalescer.signal(0, ());
        coalescer.cancel();
        assert_eq!(coalescer.poll(100), None);
    }
}
