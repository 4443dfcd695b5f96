//! Per-name call counting.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::activation::Activation;
use crate::render::SEPARATOR;
use crate::{Collector, ERR_POISONED_LOCK};

/// Counts invocations of wrapped callables, keyed by callable name.
///
/// If two callables are wrapped under the same name, the `Counter` combines
/// their counts.
///
/// A call is counted only when it returns: the name is seeded into the count
/// map before the callable runs, but the increment happens after it completes,
/// so a call that panics is observed at zero rather than counted.
///
/// # Examples
///
/// ```
/// use all_the_calls::{Collector, Counter};
///
/// let counter = Counter::new();
/// let mut double = counter.wrap("double", |x: i64| x * 2);
/// let mut negate = counter.wrap("negate", |x: i64| -x);
///
/// assert_eq!(double(4), 8);
/// assert_eq!(double(8), 16);
/// assert_eq!(negate(3), -3);
///
/// assert_eq!(counter.calls("double"), 2);
/// assert_eq!(counter.calls("negate"), 1);
/// assert_eq!(counter.total_calls(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Counter {
    activation: Activation,
    counts: Arc<Mutex<HashMap<String, u64>>>,
}

impl Counter {
    /// Creates a new counter, active and with an empty count map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activation: Activation::new(),
            counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of recorded calls for the given name, zero if never observed.
    #[must_use]
    pub fn calls(&self, name: &str) -> u64 {
        self.counts
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the call counts over all tracked names.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.counts.lock().expect(ERR_POISONED_LOCK).values().sum()
    }

    /// Prints the rendered counts to standard output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        println!("{self}");
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for Counter {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&self, active: bool) {
        self.activation.set_active(active);
    }

    fn initialize(&self) {
        self.counts.lock().expect(ERR_POISONED_LOCK).clear();
    }

    fn measure(&self, name: &str, call: &mut dyn FnMut()) {
        // Seed the name before the call so a first observation is visible
        // even if the call never returns. The lock is not held across the
        // call itself.
        self.counts
            .lock()
            .expect(ERR_POISONED_LOCK)
            .entry(name.to_owned())
            .or_insert(0);

        call();

        let mut counts = self.counts.lock().expect(ERR_POISONED_LOCK);
        let count = counts.entry(name.to_owned()).or_insert(0);
        *count = count
            .checked_add(1)
            .expect("call count overflows u64 - this indicates an unrealistic scenario");
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts.lock().expect(ERR_POISONED_LOCK);

        writeln!(f, "Counter(")?;

        // Sort names for consistent output.
        let mut sorted: Vec<_> = counts.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        for (name, count) in sorted {
            writeln!(f, "[{name}] number of calls : {count}")?;
        }

        let total: u64 = counts.values().sum();
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "total number of calls : {total}")?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_active() {
        let counter = Counter::new();

        assert!(counter.is_active());
        assert_eq!(counter.total_calls(), 0);
        assert_eq!(counter.calls("anything"), 0);
    }

    #[test]
    fn counts_per_name_and_in_total() {
        let counter = Counter::new();
        let mut f = counter.wrap("f", |()| ());
        let mut g = counter.wrap("g", |()| ());

        for _ in 0..3 {
            f(());
        }
        for _ in 0..2 {
            g(());
        }

        assert_eq!(counter.calls("f"), 3);
        assert_eq!(counter.calls("g"), 2);
        assert_eq!(counter.total_calls(), 5);
    }

    #[test]
    fn distinct_callables_sharing_a_name_merge() {
        let counter = Counter::new();
        let mut first = counter.wrap("f", |x: i64| x + 1);
        let mut second = counter.wrap("f", |x: i64| x - 1);

        first(0);
        first(0);
        second(0);

        assert_eq!(counter.calls("f"), 3);
        assert_eq!(counter.total_calls(), 3);
    }

    #[test]
    fn deactivation_stops_counting_without_reset() {
        let counter = Counter::new();
        let mut f = counter.wrap("f", |()| ());

        f(());
        counter.set_active(false);
        for _ in 0..5 {
            f(());
        }
        counter.set_active(true);
        f(());

        assert_eq!(counter.total_calls(), 2);
    }

    #[test]
    fn initialize_clears_counts_but_not_activation() {
        let counter = Counter::new();
        let mut f = counter.wrap("f", |()| ());

        f(());
        counter.set_active(false);
        counter.initialize();

        assert_eq!(counter.total_calls(), 0);
        assert!(counter.is_inactive());
    }

    #[test]
    fn panicking_call_is_observed_but_not_counted() {
        let counter = Counter::new();
        {
            let counter = counter.clone();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
                let mut explode = counter.wrap("explode", |()| panic!("boom"));
                explode(());
            }));
            assert!(result.is_err());
        }

        // The name was seeded before the call, but the increment was skipped.
        assert_eq!(counter.calls("explode"), 0);
        assert_eq!(counter.total_calls(), 0);
    }

    #[test]
    fn display_lists_names_alphabetically_with_total() {
        let counter = Counter::new();
        let mut beta = counter.wrap("beta", |()| ());
        let mut alpha = counter.wrap("alpha", |()| ());

        beta(());
        alpha(());
        beta(());

        let rendered = counter.to_string();
        let expected = "Counter(\n\
                        [alpha] number of calls : 1\n\
                        [beta] number of calls : 2\n\
                        -----------\n\
                        total number of calls : 3\n\
                        )";
        assert_eq!(rendered, expected);
    }

    static_assertions::assert_impl_all!(Counter: Send, Sync);
}
