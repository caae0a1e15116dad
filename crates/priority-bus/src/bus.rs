//! # Event Bus
//!
//! The facade producers and subscribers talk to.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──init()──► Initialized   (terminal)
//!       │                        │
//!       ├─ register/unregister   ├─ register/unregister
//!       └─ post → NotInitialized └─ post → queue (or drop + warn)
//! ```
//!
//! The bus is an ordinary value owned by the application and shared by
//! reference (typically `Arc<EventBus>`). Each instance has its own registry,
//! queue and dispatch thread.
//!
//! ## Delivery semantics
//!
//! Best-effort. `post` checks for listeners at post time and drops the event
//! with a warning if there are none. The dispatcher looks listeners up again
//! at delivery time, so the set it delivers to may differ from the one seen
//! by `post`.

use crate::config::BusConfig;
use crate::dispatch;
use crate::error::BusError;
use crate::events::{Event, Payload};
use crate::listener::ListenerRef;
use crate::queue::{PriorityOrder, PriorityQueue};
use crate::registry::ListenerRegistry;
use crate::stats::{BusStats, BusStatsSnapshot};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// In-process priority event dispatcher.
pub struct EventBus {
    config: BusConfig,

    /// Listener sets by event type. Independent of the lifecycle state.
    registry: Arc<ListenerRegistry>,

    /// Set exactly once, under `init_guard`.
    queue: OnceLock<Arc<PriorityQueue>>,

    /// Serializes the init check with queue construction.
    init_guard: Mutex<()>,

    stats: Arc<BusStats>,
}

impl EventBus {
    /// Create an uninitialized bus with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create an uninitialized bus with the given configuration.
    #[must_use]
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            config,
            registry: Arc::new(ListenerRegistry::new()),
            queue: OnceLock::new(),
            init_guard: Mutex::new(()),
            stats: Arc::new(BusStats::default()),
        }
    }

    /// Build the queue and start the dispatch thread.
    ///
    /// # Errors
    ///
    /// - `BusError::AlreadyInitialized` - `init` already succeeded on this bus
    /// - `BusError::DispatcherSpawn` - the thread could not be started; the
    ///   bus stays uninitialized
    pub fn init(&self, prefer_higher_priority: bool) -> Result<(), BusError> {
        let _guard = self.init_guard.lock();
        if self.queue.get().is_some() {
            return Err(BusError::AlreadyInitialized);
        }

        let order = PriorityOrder::from_prefer_higher(prefer_higher_priority);
        let queue = Arc::new(PriorityQueue::with_capacity(
            order,
            self.config.queue_capacity,
        ));

        let thread = &self.config.dispatcher_thread_name;
        dispatch::spawn(
            thread,
            Arc::clone(&queue),
            Arc::clone(&self.registry),
            Arc::clone(&self.stats),
        )
        .map_err(|source| BusError::DispatcherSpawn {
            thread: thread.clone(),
            source,
        })?;

        // The guard is held and the cell was checked empty above.
        let installed = self.queue.set(queue).is_ok();
        debug_assert!(installed, "queue installed twice under the init guard");
        Ok(())
    }

    /// Post an event.
    ///
    /// If no listener is registered for `event_type` the event is dropped and
    /// a warning is logged; this is not an error.
    ///
    /// # Errors
    ///
    /// - `BusError::NotInitialized` - `init` has not run yet
    pub fn post(
        &self,
        event_type: &str,
        priority: i32,
        payload: Option<Payload>,
    ) -> Result<(), BusError> {
        let queue = self.queue.get().ok_or(BusError::NotInitialized)?;

        if !self.registry.has_listeners(event_type) {
            self.stats.record_dropped();
            warn!(
                event_type = %event_type,
                priority,
                "An event has been posted for an event type which does not have a listener"
            );
            return Ok(());
        }

        // Counted before the dispatcher can see it.
        self.stats.record_posted();
        queue.offer(Event::new(event_type, priority, payload));
        debug!(event_type = %event_type, priority, "Event queued");
        Ok(())
    }

    /// Post an event carrying `value` as its payload.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    pub fn post_value<T>(&self, event_type: &str, priority: i32, value: T) -> Result<(), BusError>
    where
        T: Any + Send + Sync,
    {
        self.post(event_type, priority, Some(Arc::new(value)))
    }

    /// Register `listener` for `event_type`. Allowed in any state.
    ///
    /// Returns `false` if the instance was already registered for the type.
    pub fn register(&self, event_type: &str, listener: ListenerRef) -> bool {
        self.registry.register(event_type, listener)
    }

    /// Unregister `listener` from `event_type`. Allowed in any state.
    ///
    /// Returns `false` if it was not registered there.
    pub fn unregister(&self, event_type: &str, listener: &ListenerRef) -> bool {
        self.registry.unregister(event_type, listener)
    }

    /// Whether `init` has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.queue.get().is_some()
    }

    /// The dispatch order, once initialized.
    #[must_use]
    pub fn order(&self) -> Option<PriorityOrder> {
        self.queue.get().map(|q| q.order())
    }

    /// Events queued but not yet taken by the dispatcher.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.get().map_or(0, |q| q.len())
    }

    /// Number of listeners registered for `event_type`.
    #[must_use]
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.registry.listener_count(event_type)
    }

    /// Current activity counters.
    #[must_use]
    pub fn stats(&self) -> BusStatsSnapshot {
        self.stats.snapshot()
    }

    /// The configuration this bus was built with.
    #[must_use]
    pub fn config(&self) -> &BusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
