//! Gesture processing benchmarks.
//!
//! Measures the cost of pushing long swipe traces through the controller
//! and of parsing recorded traces.
//!
//! Run with: cargo bench --bench gesture_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pageswipe::config::ControllerConfig;
use pageswipe::controller::GestureController;
use pageswipe::model::{TouchEvent, Viewport};
use pageswipe::parser::{format_trace_line, parse_trace};
use pageswipe::replay::replay_trace;

const PAGE: f64 = 300.0;

/// `swipes` alternating forward and backward flings, 100 ms apart.
fn swipe_trace(swipes: usize) -> Vec<TouchEvent> {
    let mut events = Vec::with_capacity(swipes * 6);
    let mut t = 0;
    for swipe in 0..swipes {
        let step = if swipe % 2 == 0 { -50.0 } else { 50.0 };
        let mut x = if step < 0.0 { 250.0 } else { 50.0 };
        events.push(TouchEvent::down(x, 100.0, t));
        for _ in 0..4 {
            t += 10;
            x += step;
            events.push(TouchEvent::moved(x, 100.0, t));
        }
        t += 10;
        events.push(TouchEvent::up(x, 100.0, t));
        t += 700;
    }
    events
}

fn controller() -> GestureController {
    GestureController::new(
        ControllerConfig::default(),
        vec![PAGE; 10],
        Viewport::sized(PAGE, 480.0),
    )
    .expect("valid controller")
}

fn bench_route_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_events");
    for swipes in [10usize, 100, 1000] {
        let events = swipe_trace(swipes);
        group.bench_with_input(BenchmarkId::from_parameter(swipes), &events, |b, events| {
            b.iter(|| {
                let mut controller = controller();
                for event in events {
                    black_box(controller.route(*event));
                }
                black_box(controller.current_offset())
            });
        });
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let events = swipe_trace(100);
    c.bench_function("replay_100_swipes_16ms", |b| {
        b.iter(|| {
            let (records, _) = replay_trace(controller(), black_box(&events), 16);
            black_box(records.len())
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let lines: Vec<String> = swipe_trace(1000)
        .into_iter()
        .map(|event| format_trace_line(event).expect("finite coordinates"))
        .collect();
    c.bench_function("parse_6000_trace_lines", |b| {
        b.iter(|| black_box(parse_trace(black_box(&lines))))
    });
}

criterion_group!(benches, bench_route_events, bench_replay, bench_parse);
criterion_main!(benches);
