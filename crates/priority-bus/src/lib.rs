//! # Priority Bus - In-Process Priority Event Dispatcher
//!
//! Producers post typed events with a priority and an optional payload; a
//! single background thread drains a priority-ordered queue and fans each
//! event out to the listeners registered for its type.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   post()    ┌──────────────┐   take()   ┌──────────────┐
//! │  Producers   │ ──────────► │ PriorityQueue│ ─────────► │  Dispatcher  │
//! │ (any thread) │             │  (unbounded) │            │ (one thread) │
//! └──────────────┘             └──────────────┘            └──────┬───────┘
//!        │ register()                                              │ listeners_for()
//!        ▼                                                         ▼
//!                        ┌──────────────────────────┐
//!                        │     ListenerRegistry     │
//!                        │  event_type -> {Listener}│
//!                        └──────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - `init` runs once per bus; `post` before `init` is an error
//! - Events for a type with no listeners are dropped at post time (logged)
//! - Listeners are looked up at delivery time, not at post time
//! - A failing or panicking listener is logged and skipped; dispatch continues
//!
//! ## Example
//!
//! ```rust
//! use priority_bus::{Event, EventBus, ListenerError, ListenerRef};
//! use std::sync::Arc;
//!
//! let bus = EventBus::new();
//! let listener: ListenerRef = Arc::new(|event: &Event| {
//!     println!("{} @ {}", event.event_type(), event.priority());
//!     Ok::<(), ListenerError>(())
//! });
//!
//! bus.register("alarm", listener);
//! bus.init(true).expect("first init");
//! bus.post_value("alarm", 9, "high").expect("initialized");
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod listener;
pub mod queue;
pub mod registry;
pub mod stats;

// Re-export main types
pub use bus::EventBus;
pub use config::BusConfig;
pub use dispatch::{dispatch_event, DispatchReport};
pub use error::{BusError, ListenerError, ListenerFailure};
pub use events::{Event, Payload};
pub use listener::{same_listener, Listener, ListenerRef};
pub use queue::{PriorityOrder, PriorityQueue};
pub use registry::ListenerRegistry;
pub use stats::{BusStats, BusStatsSnapshot};

/// Initial heap capacity of the priority queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default name of the dispatch thread.
pub const DISPATCHER_THREAD_NAME: &str = "EventBus Thread";
