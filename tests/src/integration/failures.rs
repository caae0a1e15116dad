//! # Failure Isolation
//!
//! A listener that errors or panics is logged and skipped. Its siblings still
//! run on the same event, it still receives later events, and the dispatch
//! thread keeps going.

#[cfg(test)]
mod tests {
    use crate::support::{started_bus, wait_for_dispatched, wait_until, Faulty, Recorder};
    use bus_telemetry::test_logs;

    #[test]
    fn test_erroring_listener_does_not_block_siblings() {
        let bus = started_bus(true);
        let faulty = Faulty::erroring();
        let healthy = Recorder::new("healthy");
        bus.register("job", faulty.clone());
        bus.register("job", healthy.clone());

        bus.post_value("job", 1, "first").unwrap();
        bus.post_value("job", 1, "second").unwrap();

        assert!(wait_for_dispatched(&bus, 2));
        assert_eq!(faulty.calls(), 2);
        assert_eq!(healthy.count(), 2);

        let stats = bus.stats();
        assert_eq!(stats.listener_failures, 2);
        assert_eq!(stats.deliveries, 2);
    }

    #[test]
    fn test_panicking_listener_does_not_kill_dispatcher() {
        let bus = started_bus(true);
        let faulty = Faulty::panicking();
        let healthy = Recorder::new("healthy");
        bus.register("job", faulty.clone());
        bus.register("job", healthy.clone());

        for i in 0..5 {
            bus.post("job", i, None).unwrap();
        }

        assert!(wait_for_dispatched(&bus, 5));
        assert_eq!(faulty.calls(), 5);
        assert_eq!(healthy.count(), 5);
        assert_eq!(bus.stats().listener_failures, 5);
    }

    #[test]
    fn test_dispatcher_serves_other_types_after_failures() {
        let bus = started_bus(true);
        bus.register("bad", Faulty::panicking());
        let good = Recorder::new("good");
        bus.register("good", good.clone());

        bus.post("bad", 10, None).unwrap();
        assert!(wait_for_dispatched(&bus, 1));
        bus.post_value("good", 0, "still alive").unwrap();

        assert!(wait_for_dispatched(&bus, 2));
        assert_eq!(good.labels(), vec!["still alive"]);
    }

    #[test]
    fn test_failures_never_reach_producer() {
        let bus = started_bus(false);
        bus.register("job", Faulty::erroring());

        for _ in 0..3 {
            assert!(bus.post("job", 0, None).is_ok());
        }
        assert!(wait_for_dispatched(&bus, 3));
        assert_eq!(bus.stats().posted, 3);
    }

    #[test]
    fn test_listener_failure_is_logged_from_dispatcher() {
        let bus = started_bus(true);
        bus.register("ledger_audit", Faulty::erroring());
        bus.register("ledger_panic", Faulty::panicking());

        bus.post("ledger_audit", 1, None).unwrap();
        bus.post("ledger_panic", 1, None).unwrap();
        assert!(wait_for_dispatched(&bus, 2));

        let logs = test_logs();
        assert!(wait_until(|| !logs.lines("event_type=ledger_panic").is_empty()));

        let erroring = logs.lines("event_type=ledger_audit");
        assert_eq!(erroring.len(), 1, "captured: {}", logs.contents());
        assert!(erroring[0].contains("ERROR"));
        assert!(erroring[0].contains("listener=faulty-error"));
        assert!(erroring[0].contains("cannot handle ledger_audit"));

        let panicking = logs.lines("event_type=ledger_panic");
        assert_eq!(panicking.len(), 1);
        assert!(panicking[0].contains("listener=faulty-panic"));
        assert!(panicking[0].contains("listener_panicked"));
    }
}
