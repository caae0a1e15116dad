//! Shared fixtures for the integration suite.

use parking_lot::Mutex;
use priority_bus::{Event, EventBus, Listener, ListenerError};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// How long helpers wait for the dispatcher before giving up.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// A delivery seen by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub event_type: String,
    pub priority: i32,
    pub label: Option<String>,
}

/// Records every event it receives. `&str` and `String` payloads become the
/// delivery label.
pub struct Recorder {
    name: String,
    seen: Mutex<Vec<Delivery>>,
}

impl Recorder {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.seen.lock().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter_map(|d| d.label.clone())
            .collect()
    }

    pub fn priorities(&self) -> Vec<i32> {
        self.seen.lock().iter().map(|d| d.priority).collect()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }
}

impl Listener for Recorder {
    fn handle_event(&self, event: &Event) -> Result<(), ListenerError> {
        let label = event
            .payload_as::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| event.payload_as::<String>().cloned());

        self.seen.lock().push(Delivery {
            event_type: event.event_type().to_string(),
            priority: event.priority(),
            label,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fails (or panics) on every event after recording it.
pub struct Faulty {
    panics: bool,
    calls: Mutex<usize>,
}

impl Faulty {
    pub fn erroring() -> Arc<Self> {
        Arc::new(Self {
            panics: false,
            calls: Mutex::new(0),
        })
    }

    pub fn panicking() -> Arc<Self> {
        Arc::new(Self {
            panics: true,
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl Listener for Faulty {
    fn handle_event(&self, event: &Event) -> Result<(), ListenerError> {
        *self.calls.lock() += 1;
        if self.panics {
            panic!("faulty listener panicked on {}", event.event_type());
        }
        Err(ListenerError::failed(format!(
            "cannot handle {}",
            event.event_type()
        )))
    }

    fn name(&self) -> &str {
        if self.panics {
            "faulty-panic"
        } else {
            "faulty-error"
        }
    }
}

/// Parks the dispatch thread so tests can queue events deterministically.
pub struct Gate {
    entered: Barrier,
    release: Barrier,
}

/// Event type used by [`Gate`].
pub const GATE_EVENT: &str = "__gate";

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Barrier::new(2),
            release: Barrier::new(2),
        })
    }

    /// Post a gate event and return once the dispatcher is blocked inside it.
    ///
    /// Call on an idle bus; the gate event must be the next one taken.
    pub fn hold(self: &Arc<Self>, bus: &EventBus) {
        bus.register(GATE_EVENT, self.clone());
        bus.post(GATE_EVENT, 0, None).expect("bus must be initialized");
        self.entered.wait();
    }

    /// Let the dispatcher continue.
    pub fn release(&self) {
        self.release.wait();
    }
}

impl Listener for Gate {
    fn handle_event(&self, _event: &Event) -> Result<(), ListenerError> {
        self.entered.wait();
        self.release.wait();
        Ok(())
    }

    fn name(&self) -> &str {
        "gate"
    }
}

/// Poll until `cond` holds or [`DISPATCH_TIMEOUT`] elapses.
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + DISPATCH_TIMEOUT;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

/// Wait until the dispatcher has taken `count` events off the queue.
pub fn wait_for_dispatched(bus: &EventBus, count: u64) -> bool {
    wait_until(|| bus.stats().dispatched >= count)
}

/// An initialized bus with test logging installed.
pub fn started_bus(prefer_higher_priority: bool) -> EventBus {
    bus_telemetry::init_test_logging();
    let bus = EventBus::new();
    bus.init(prefer_higher_priority)
        .expect("fresh bus must initialize");
    bus
}
