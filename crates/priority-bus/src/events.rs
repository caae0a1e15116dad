//! # Events
//!
//! Defines the immutable value that flows through the bus.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque, shared, read-only event payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// One posted occurrence: a type, a priority and an optional payload.
///
/// Events are constructed once at post time and never mutated. Listeners
/// receive them by reference; the payload is shared, not copied.
#[derive(Clone)]
pub struct Event {
    event_type: String,
    priority: i32,
    payload: Option<Payload>,
}

impl Event {
    /// Create a new event.
    ///
    /// No validation is applied; an empty `event_type` is legal and only
    /// matches listeners registered under `""`.
    pub fn new(event_type: impl Into<String>, priority: i32, payload: Option<Payload>) -> Self {
        Self {
            event_type: event_type.into(),
            priority,
            payload,
        }
    }

    /// Create an event carrying `value` as its payload.
    pub fn with_value<T>(event_type: impl Into<String>, priority: i32, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::new(event_type, priority, Some(Arc::new(value)))
    }

    /// The event category.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Caller-assigned priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The raw payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Downcast the payload to a concrete type.
    ///
    /// Returns `None` when there is no payload or it is not a `T`.
    #[must_use]
    pub fn payload_as<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("priority", &self.priority)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}
