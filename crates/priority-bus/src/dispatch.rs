//! # Dispatch Loop
//!
//! The single consumer of the priority queue.
//!
//! ```text
//! loop {
//!   event     = queue.take()              (blocks while empty)
//!   listeners = registry.listeners_for()  (snapshot at delivery time)
//!   for each listener:
//!       handle_event(&event)
//!           ├─ Ok          ─► next listener
//!           ├─ Err(e)      ─► log ListenerFailure, next listener
//!           └─ panic       ─► caught, log ListenerFailure, next listener
//! }
//! ```
//!
//! ## Panic handling
//!
//! Each invocation is wrapped in `catch_unwind` with `AssertUnwindSafe`. A
//! listener that panics while holding its own lock may leave that state
//! poisoned or inconsistent; the bus itself holds no locks during the call.

use crate::error::{ListenerError, ListenerFailure};
use crate::events::Event;
use crate::listener::ListenerRef;
use crate::queue::PriorityQueue;
use crate::registry::ListenerRegistry;
use crate::stats::BusStats;
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

/// Outcome of delivering one event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that handled the event without error.
    pub delivered: usize,
    /// Listeners that failed.
    pub failures: Vec<ListenerFailure>,
}

/// Start the dispatch thread.
///
/// The thread runs until process exit. The returned handle is never joined
/// by the bus.
pub(crate) fn spawn(
    thread_name: &str,
    queue: Arc<PriorityQueue>,
    registry: Arc<ListenerRegistry>,
    stats: Arc<BusStats>,
) -> io::Result<JoinHandle<()>> {
    let order = queue.order();
    let handle = thread::Builder::new()
        .name(thread_name.to_string())
        .spawn(move || run(&queue, &registry, &stats))?;

    info!(thread = %thread_name, order = ?order, "Dispatcher started");
    Ok(handle)
}

fn run(queue: &PriorityQueue, registry: &ListenerRegistry, stats: &BusStats) {
    loop {
        let event = queue.take();
        let report = dispatch_event(&event, registry);
        stats.record_dispatched(report.delivered as u64, report.failures.len() as u64);
    }
}

/// Deliver `event` to every listener currently registered for its type.
///
/// Failures are logged and collected; they never stop delivery to the
/// remaining listeners.
pub fn dispatch_event(event: &Event, registry: &ListenerRegistry) -> DispatchReport {
    let listeners = registry.listeners_for(event.event_type());
    let mut report = DispatchReport::default();

    for listener in &listeners {
        match invoke(listener, event) {
            Ok(()) => report.delivered += 1,
            Err(failure) => {
                error!(
                    event_type = %failure.event_type,
                    listener = %failure.listener,
                    error = %failure.source,
                    kind = failure.source.as_label(),
                    "An error occurred while handling an event"
                );
                report.failures.push(failure);
            }
        }
    }

    debug!(
        event_type = %event.event_type(),
        priority = event.priority(),
        delivered = report.delivered,
        failed = report.failures.len(),
        "Event dispatched"
    );
    report
}

fn invoke(listener: &ListenerRef, event: &Event) -> Result<(), ListenerFailure> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.handle_event(event)))
        .unwrap_or_else(|panic_err| Err(ListenerError::Panicked(panic_message(&*panic_err))));

    outcome.map_err(|source| ListenerFailure {
        event_type: event.event_type().to_string(),
        listener: listener.name().to_string(),
        source,
    })
}

fn panic_message(panic_err: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic_err.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
