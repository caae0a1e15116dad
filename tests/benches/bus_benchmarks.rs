//! # Priority Bus Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | queue | offer + drain through the heap |
//! | post | producer-side cost of `EventBus::post` |
//! | dispatch | fan-out of one event to N listeners |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use priority_bus::{
    dispatch_event, Event, EventBus, ListenerError, ListenerRef, ListenerRegistry, PriorityOrder,
    PriorityQueue,
};
use rand::Rng;
use std::sync::Arc;

fn noop() -> ListenerRef {
    Arc::new(|event: &Event| {
        black_box(event.priority());
        Ok::<(), ListenerError>(())
    })
}

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");
    let mut rng = rand::thread_rng();

    for size in [100, 1_000, 10_000] {
        let priorities: Vec<i32> = (0..size).map(|_| rng.gen()).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("offer_drain", size), &priorities, |b, ps| {
            b.iter(|| {
                let queue = PriorityQueue::new(PriorityOrder::HighestFirst);
                for p in ps {
                    queue.offer(Event::new("bench", *p, None));
                }
                while let Some(event) = queue.try_take() {
                    black_box(event);
                }
            })
        });
    }
    group.finish();
}

fn bench_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("post");

    let bus = EventBus::new();
    bus.init(true).expect("init");
    bus.register("hit", noop());

    group.bench_function("matched", |b| {
        b.iter(|| bus.post(black_box("hit"), 1, None).expect("post"))
    });
    group.bench_function("unmatched", |b| {
        b.iter(|| bus.post(black_box("miss"), 1, None).expect("post"))
    });
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for listeners in [1, 8, 64] {
        let registry = ListenerRegistry::new();
        for _ in 0..listeners {
            registry.register("fan", noop());
        }
        let event = Event::new("fan", 0, None);

        group.throughput(Throughput::Elements(listeners as u64));
        group.bench_with_input(BenchmarkId::new("fan_out", listeners), &event, |b, ev| {
            b.iter(|| black_box(dispatch_event(ev, &registry)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_queue, bench_post, bench_dispatch);
criterion_main!(benches);
