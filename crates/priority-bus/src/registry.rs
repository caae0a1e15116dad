//! # Listener Registry
//!
//! Concurrent map from event type to the set of listeners registered for it.
//!
//! Entries are created on first registration and are left in place (possibly
//! empty) after removals. An empty entry behaves exactly like a missing one.

use crate::listener::{same_listener, ListenerRef};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Event type to listener set.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: DashMap<String, Vec<ListenerRef>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `listener` to the set for `event_type`.
    ///
    /// Returns `false` if this instance was already registered for the type.
    pub fn register(&self, event_type: &str, listener: ListenerRef) -> bool {
        // The shard lock is released before `name()` runs; listeners may
        // query the registry from there.
        let added = {
            let mut set = self.listeners.entry(event_type.to_string()).or_default();
            if set.iter().any(|l| same_listener(l, &listener)) {
                false
            } else {
                set.push(Arc::clone(&listener));
                true
            }
        };

        if added {
            debug!(
                event_type = %event_type,
                listener = listener.name(),
                "Listener registered"
            );
        }
        added
    }

    /// Remove `listener` from the set for `event_type`.
    ///
    /// Returns `false` if it was not registered there.
    pub fn unregister(&self, event_type: &str, listener: &ListenerRef) -> bool {
        let removed = match self.listeners.get_mut(event_type) {
            Some(mut set) => {
                let before = set.len();
                set.retain(|l| !same_listener(l, listener));
                set.len() != before
            }
            None => false,
        };

        if removed {
            debug!(
                event_type = %event_type,
                listener = listener.name(),
                "Listener unregistered"
            );
        }
        removed
    }

    /// Whether at least one listener is registered for `event_type`.
    #[must_use]
    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listeners
            .get(event_type)
            .is_some_and(|set| !set.is_empty())
    }

    /// Snapshot of the listeners registered for `event_type` right now.
    ///
    /// Only the entry's shard is locked, and only while the handles are
    /// cloned; callers iterate the returned `Vec` lock-free.
    #[must_use]
    pub fn listeners_for(&self, event_type: &str) -> Vec<ListenerRef> {
        self.listeners
            .get(event_type)
            .map(|set| set.value().clone())
            .unwrap_or_default()
    }

    /// Number of listeners registered for `event_type`.
    #[must_use]
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, |set| set.len())
    }

    /// Event types that currently have at least one listener.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.listeners
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect()
    }
}
