//! # Priority Queue
//!
//! Unbounded, blocking priority queue shared between producers and the
//! dispatch thread.
//!
//! ## Ordering
//!
//! The order is fixed at construction:
//!
//! - [`PriorityOrder::HighestFirst`] - numerically greatest priority is taken first
//! - [`PriorityOrder::LowestFirst`] - numerically least priority is taken first
//!
//! Events of equal priority come out in no particular order.

use crate::events::Event;
use parking_lot::{Condvar, Mutex};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Which end of the priority range is dispatched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityOrder {
    HighestFirst,
    LowestFirst,
}

impl PriorityOrder {
    /// Map the `prefer_higher_priority` flag to an order.
    #[must_use]
    pub fn from_prefer_higher(prefer_higher_priority: bool) -> Self {
        if prefer_higher_priority {
            PriorityOrder::HighestFirst
        } else {
            PriorityOrder::LowestFirst
        }
    }

    /// Heap key for `priority`. The heap pops the largest key.
    fn rank(self, priority: i32) -> i64 {
        match self {
            PriorityOrder::HighestFirst => i64::from(priority),
            PriorityOrder::LowestFirst => -i64::from(priority),
        }
    }
}

/// Heap entry. Only `rank` takes part in comparisons.
struct Ranked {
    rank: i64,
    event: Event,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Thread-safe unbounded priority queue of [`Event`]s.
pub struct PriorityQueue {
    heap: Mutex<BinaryHeap<Ranked>>,
    available: Condvar,
    order: PriorityOrder,
}

impl PriorityQueue {
    /// Create an empty queue with the default initial capacity.
    #[must_use]
    pub fn new(order: PriorityOrder) -> Self {
        Self::with_capacity(order, crate::DEFAULT_QUEUE_CAPACITY)
    }

    /// Create an empty queue with room for `capacity` events before the
    /// heap reallocates. The queue still grows without bound.
    #[must_use]
    pub fn with_capacity(order: PriorityOrder, capacity: usize) -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::with_capacity(capacity)),
            available: Condvar::new(),
            order,
        }
    }

    /// The ordering policy this queue was built with.
    #[must_use]
    pub fn order(&self) -> PriorityOrder {
        self.order
    }

    /// Add an event. Never blocks beyond the heap lock.
    pub fn offer(&self, event: Event) {
        let rank = self.order.rank(event.priority());
        self.heap.lock().push(Ranked { rank, event });
        self.available.notify_one();
    }

    /// Remove the next event, blocking while the queue is empty.
    pub fn take(&self) -> Event {
        let mut heap = self.heap.lock();
        loop {
            if let Some(entry) = heap.pop() {
                return entry.event;
            }
            self.available.wait(&mut heap);
        }
    }

    /// Remove the next event, waiting at most `timeout` for one to arrive.
    ///
    /// Wakeups that find the queue empty (spurious, or the event went to
    /// another consumer) keep waiting until the deadline.
    pub fn take_timeout(&self, timeout: Duration) -> Option<Event> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.take());
        };

        let mut heap = self.heap.lock();
        loop {
            if let Some(entry) = heap.pop() {
                return Some(entry.event);
            }
            if self.available.wait_until(&mut heap, deadline).timed_out() {
                return heap.pop().map(|entry| entry.event);
            }
        }
    }

    /// Remove the next event if one is queued.
    pub fn try_take(&self) -> Option<Event> {
        self.heap.lock().pop().map(|entry| entry.event)
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }
}
