//! Example demonstrating bulk instrumentation through a [`MethodRegistry`].
//!
//! A registry stands in for the callable members of a composite type. One
//! `instrument` call rewraps the selected members so their invocations feed
//! a shared collector.
//!
//! Run with: `cargo run --example registry_instrumentation`.

use all_the_calls::{MethodRegistry, TimerCounter};

fn main() {
    println!("=== Registry Instrumentation Example ===");
    println!();

    let mut registry = MethodRegistry::new();
    registry.register("celsius_to_fahrenheit", |c: f64| c * 9.0 / 5.0 + 32.0);
    registry.register("fahrenheit_to_celsius", |f: f64| (f - 32.0) * 5.0 / 9.0);
    registry.register("identity", |x: f64| x);

    let tracker = TimerCounter::new();

    // Only the two conversion members are instrumented; `identity` stays
    // untouched.
    registry
        .instrument(
            &tracker,
            Some(&["celsius_to_fahrenheit", "fahrenheit_to_celsius"]),
        )
        .expect("all listed members are registered");

    for celsius in [0.0, 37.0, 100.0] {
        let fahrenheit = registry
            .invoke("celsius_to_fahrenheit", celsius)
            .expect("member is registered");
        println!("{celsius}°C = {fahrenheit}°F");
    }

    let celsius = registry
        .invoke("fahrenheit_to_celsius", 451.0)
        .expect("member is registered");
    println!("451°F = {celsius}°C");

    let same = registry
        .invoke("identity", 42.0)
        .expect("member is registered");
    println!("identity(42) = {same} (not measured)");

    println!();
    tracker.print_to_stdout();
}
