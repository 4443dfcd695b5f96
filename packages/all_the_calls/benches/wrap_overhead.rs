//! Benchmarks to measure the compute overhead of `all_the_calls` logic itself.
//!
//! These benchmarks wrap callables that do no work, so the measurements show
//! only the bookkeeping overhead each collector adds per call.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use all_the_calls::{CallLog, Collector, Counter, Timer, TimerCounter};
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_overhead");

    // Baseline measurement - an unwrapped empty callable.
    group.bench_function("baseline_unwrapped", |b| {
        let mut callable = |()| black_box(());
        b.iter(|| callable(()));
    });

    {
        let counter = Counter::new();
        let mut wrapped = counter.wrap("empty", |()| black_box(()));
        group.bench_function("counter_empty_call", |b| {
            b.iter(|| wrapped(()));
        });
    }

    {
        let timer = Timer::new();
        let mut wrapped = timer.wrap("empty", |()| black_box(()));
        group.bench_function("timer_empty_call", |b| {
            b.iter(|| wrapped(()));
        });
    }

    {
        let tracker = TimerCounter::new();
        let mut wrapped = tracker.wrap("empty", |()| black_box(()));
        group.bench_function("timer_counter_empty_call", |b| {
            b.iter(|| wrapped(()));
        });
    }

    {
        let log = CallLog::new();
        let mut wrapped = log.wrap("empty", |()| black_box(()));
        group.bench_function("call_log_empty_call", |b| {
            b.iter(|| wrapped(()));
        });
    }

    // An inactive collector should add only the cost of the flag check.
    {
        let counter = Counter::new();
        counter.set_active(false);
        let mut wrapped = counter.wrap("empty", |()| black_box(()));
        group.bench_function("counter_inactive_call", |b| {
            b.iter(|| wrapped(()));
        });
    }

    group.finish();
}
