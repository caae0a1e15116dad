//! # Error Types
//!
//! Errors surfaced by the bus facade and by listeners during dispatch.

use std::io;
use thiserror::Error;

/// Errors returned synchronously to callers of [`EventBus`](crate::EventBus).
#[derive(Debug, Error)]
pub enum BusError {
    /// `init` was called on a bus that is already running.
    #[error("Event bus is already initialized")]
    AlreadyInitialized,

    /// `post` was called before `init`.
    #[error("Cannot post an event before the event bus is initialized")]
    NotInitialized,

    /// The dispatcher thread could not be started.
    #[error("Failed to spawn dispatcher thread '{thread}': {source}")]
    DispatcherSpawn {
        thread: String,
        #[source]
        source: io::Error,
    },
}

impl BusError {
    /// Short stable label for log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::AlreadyInitialized => "bus_already_initialized",
            BusError::NotInitialized => "bus_not_initialized",
            BusError::DispatcherSpawn { .. } => "bus_dispatcher_spawn",
        }
    }
}

/// Error produced by a single listener invocation.
///
/// Listeners return [`ListenerError::Failed`]; the dispatcher converts a
/// caught panic into [`ListenerError::Panicked`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The listener panicked while handling the event.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl ListenerError {
    /// Build a [`ListenerError::Failed`] from any displayable message.
    pub fn failed(message: impl Into<String>) -> Self {
        ListenerError::Failed(message.into())
    }

    /// Short stable label for log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed(_) => "listener_failed",
            ListenerError::Panicked(_) => "listener_panicked",
        }
    }
}

/// A listener failure recorded by the dispatch loop.
///
/// Never returned to producers; it is logged and counted, then dispatch
/// moves on to the next listener.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Listener '{listener}' failed on event type '{event_type}': {source}")]
pub struct ListenerFailure {
    pub event_type: String,
    pub listener: String,
    #[source]
    pub source: ListenerError,
}
