//! Advisory counters for bus activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by the facade and the dispatch thread.
#[derive(Debug, Default)]
pub struct BusStats {
    posted: AtomicU64,
    dropped_unmatched: AtomicU64,
    dispatched: AtomicU64,
    deliveries: AtomicU64,
    listener_failures: AtomicU64,
}

/// Point-in-time copy of [`BusStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStatsSnapshot {
    /// Events accepted into the queue.
    pub posted: u64,
    /// Events dropped at post time because no listener was registered.
    pub dropped_unmatched: u64,
    /// Events taken off the queue by the dispatcher.
    pub dispatched: u64,
    /// Successful listener invocations.
    pub deliveries: u64,
    /// Listener invocations that returned an error or panicked.
    pub listener_failures: u64,
}

impl BusStats {
    pub(crate) fn record_posted(&self) {
        self.posted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped_unmatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dispatched(&self, deliveries: u64, failures: u64) {
        self.deliveries.fetch_add(deliveries, Ordering::Relaxed);
        self.listener_failures.fetch_add(failures, Ordering::Relaxed);
        // Last, so a reader that sees the event counted also sees its outcome.
        self.dispatched.fetch_add(1, Ordering::Release);
    }

    /// Copy the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> BusStatsSnapshot {
        let dispatched = self.dispatched.load(Ordering::Acquire);
        BusStatsSnapshot {
            posted: self.posted.load(Ordering::Relaxed),
            dropped_unmatched: self.dropped_unmatched.load(Ordering::Relaxed),
            dispatched,
            deliveries: self.deliveries.load(Ordering::Relaxed),
            listener_failures: self.listener_failures.load(Ordering::Relaxed),
        }
    }
}
