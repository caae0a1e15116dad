//! # Listener
//!
//! The receiving side of the bus.
//!
//! Listeners are shared handles ([`ListenerRef`]). Registration identity is
//! the identity of the allocation behind the handle, so the same instance can
//! be registered under several event types and removed again by passing a
//! clone of the same `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use priority_bus::{Event, Listener, ListenerError};
//!
//! struct Siren;
//!
//! impl Listener for Siren {
//!     fn handle_event(&self, event: &Event) -> Result<(), ListenerError> {
//!         match event.payload_as::<&str>() {
//!             Some(level) => {
//!                 println!("alarm: {level}");
//!                 Ok(())
//!             }
//!             None => Err(ListenerError::failed("alarm without level")),
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "siren"
//!     }
//! }
//! ```

use crate::error::ListenerError;
use crate::events::Event;
use std::sync::Arc;

/// Event handler invoked by the dispatch thread.
///
/// Called sequentially with the other listeners for the same event, never
/// concurrently with itself. A returned error or a panic is logged by the
/// dispatcher and does not affect other listeners or later events.
pub trait Listener: Send + Sync + 'static {
    /// Handle one event.
    fn handle_event(&self, event: &Event) -> Result<(), ListenerError>;

    /// Name used in logs.
    ///
    /// Defaults to the type name; override with something short.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Listener for F
where
    F: Fn(&Event) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    fn handle_event(&self, event: &Event) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Shared listener handle as stored by the registry.
pub type ListenerRef = Arc<dyn Listener>;

/// Whether two handles point at the same listener instance.
///
/// Compares data addresses only; vtable pointers for the same type may differ
/// between codegen units.
#[must_use]
pub fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
