//! Call instrumentation utilities for counting and timing wrapped callables.
//!
//! This package lets you wrap an arbitrary callable so that every invocation is
//! transparently measured without altering the callable's behavior. The wrapped
//! callable accepts the same arguments and returns the same value as the original.
//!
//! The core functionality includes:
//! - [`Collector`] - The wrap/activate contract every collector implements
//! - [`Counter`] - Aggregates invocation counts per callable name
//! - [`Timer`] - Aggregates cumulative wall-clock runtime per callable name
//! - [`TimerCounter`] - Aggregates both counts and runtimes per callable name
//! - [`CallLog`] - Records one timestamped [`LogEntry`] per invocation
//! - [`MethodRegistry`] - Applies a collector across registered members in one step
//!
//! # Simple usage
//!
//! You can count calls like this:
//!
//! ```
//! use all_the_calls::{Collector, Counter};
//!
//! let counter = Counter::new();
//! let mut double = counter.wrap("double", |x: i64| x * 2);
//!
//! assert_eq!(double(2), 4);
//! assert_eq!(double(5), 10);
//! assert_eq!(counter.total_calls(), 2);
//!
//! // Print per-name counts and the total to console.
//! println!("{counter}");
//! ```
//!
//! # Timing calls
//!
//! ```
//! use all_the_calls::{Collector, TimerCounter};
//!
//! let tracker = TimerCounter::new();
//! let mut multiply = tracker.wrap("multiply", |(x, y): (i64, i64)| x * y);
//!
//! assert_eq!(multiply((2, 3)), 6);
//! assert_eq!(multiply((4, 5)), 20);
//!
//! assert_eq!(tracker.total_calls(), 2);
//! println!("{tracker}");
//! ```
//!
//! # Activation
//!
//! Every collector carries an activation flag, set by default. While a collector
//! is inactive its wrapped callables delegate directly to the originals and no
//! state is recorded; reactivating resumes accumulation from the prior state.
//!
//! ```
//! use all_the_calls::{Collector, Counter};
//!
//! let counter = Counter::new();
//! let mut work = counter.wrap("work", |()| ());
//!
//! counter.set_active(false);
//! work(());
//! counter.set_active(true);
//! work(());
//!
//! assert_eq!(counter.total_calls(), 1);
//! ```
//!
//! # Name collisions
//!
//! All collectors key their metrics exclusively by callable *name*. Two distinct
//! callables wrapped under the same name are indistinguishable and their metrics
//! merge. This is intentional and relied upon, not a defect to work around.
//!
//! # Threading
//!
//! Collector handles are cheap clones sharing the same state and are `Send` and
//! `Sync`, but the package assumes a single logical mutator at a time. There is
//! no atomicity guarantee across the read-modify-write of a full measurement;
//! callers requiring concurrent use should serialize access externally or use
//! per-thread collector instances.

mod activation;
mod call_log;
mod collector;
mod counter;
mod error;
mod pal;
mod registry;
mod render;
mod timer;
mod timer_counter;

pub use call_log::{CallLog, LogEntry};
pub use collector::Collector;
pub use counter::Counter;
pub use error::*;
pub use registry::MethodRegistry;
pub use timer::Timer;
pub use timer_counter::TimerCounter;

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";
