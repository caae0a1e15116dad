//! Bus configuration from environment variables.

use std::env;

/// Runtime settings for an [`EventBus`](crate::EventBus).
///
/// The dispatch order is not part of the configuration; it is chosen when
/// the bus is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Name given to the dispatch thread.
    pub dispatcher_thread_name: String,

    /// Initial heap capacity of the priority queue.
    pub queue_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            dispatcher_thread_name: crate::DISPATCHER_THREAD_NAME.to_string(),
            queue_capacity: crate::DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl BusConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PBUS_DISPATCHER_THREAD`: Dispatch thread name (default: EventBus Thread)
    /// - `PBUS_QUEUE_CAPACITY`: Initial queue capacity (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from `lookup`, which maps a variable name to its
    /// value. Blank or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            dispatcher_thread_name: lookup("PBUS_DISPATCHER_THREAD")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.dispatcher_thread_name),

            queue_capacity: lookup("PBUS_QUEUE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.queue_capacity),
        }
    }

    /// Override the dispatch thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.dispatcher_thread_name = name.into();
        self
    }

    /// Override the initial queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}
