//! Simplified example demonstrating the collector types working together.
//!
//! This example shows the lifecycle of a [`Timer`]: wrapping several
//! functions, clearing accumulated state, toggling activation and printing
//! the report.
//!
//! Run with: `cargo run --example wrapped_functions`.

use std::hint::black_box;

use all_the_calls::{CallLog, Collector, Timer};

fn busy_multiply(x: i64, y: i64) -> i64 {
    // Enough work for the runtime to be visible in the report.
    for i in 0..200_000_i64 {
        black_box(i.wrapping_mul(x));
    }
    x * y
}

fn main() {
    println!("=== Call Tracking Example ===");
    println!();

    let timer = Timer::new();

    let mut first = timer.wrap("first", |(x, y)| busy_multiply(x, y));
    let mut second = timer.wrap("second", |(x, y)| busy_multiply(x, y));
    let mut third = timer.wrap("third", |(x, y)| busy_multiply(x, y));

    println!("first(1, 2) = {}", first((1, 2)));

    // Clearing the timer forgets the call above; the flag stays set.
    timer.initialize();

    println!("second(3, 4) = {}", second((3, 4)));

    // While deactivated, calls run unmeasured.
    timer.set_inactive(true);
    println!("third(5, 6) = {} (not measured)", third((5, 6)));
    timer.set_active(true);

    println!("third(7, 8) = {}", third((7, 8)));
    println!();
    timer.print_to_stdout();
    println!();

    // The call log keeps one timestamped entry per invocation instead.
    let log = CallLog::new();
    let mut logged = log.wrap("multiply", |(x, y)| busy_multiply(x, y));
    logged((2, 3));
    logged((4, 5));

    println!("{}", log.chronological());
    println!();
    println!("entries for 'multiply': {}", log.entries_for("multiply").len());
    println!("total runtime: {:?}", log.total_runtime());
}
