//! Combined per-name call counting and runtime tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::activation::Activation;
use crate::pal::{Platform, PlatformFacade};
use crate::render::{SEPARATOR, runtime_breakdown};
use crate::{Collector, ERR_POISONED_LOCK};

/// Combined metric state, behind one lock so that a name enters the count map
/// and the runtime map together.
#[derive(Debug, Default)]
struct TimerCounterState {
    counts: HashMap<String, u64>,
    runtimes: HashMap<String, Duration>,
}

impl TimerCounterState {
    /// Inserts the name into both maps on first observation.
    fn seed(&mut self, name: &str) {
        if !self.counts.contains_key(name) {
            self.counts.insert(name.to_owned(), 0);
            self.runtimes.insert(name.to_owned(), Duration::ZERO);
        }
    }
}

/// Counts invocations and accumulates wall-clock runtime of wrapped
/// callables, keyed by callable name.
///
/// If two callables are wrapped under the same name, the `TimerCounter`
/// combines their metrics.
///
/// A name is present in the count map exactly when it is present in the
/// runtime map; both entries are created together on first observation and
/// updated together when a call returns.
///
/// # Examples
///
/// ```
/// use all_the_calls::{Collector, TimerCounter};
///
/// let tracker = TimerCounter::new();
/// let mut multiply = tracker.wrap("multiply", |(x, y): (i64, i64)| x * y);
///
/// assert_eq!(multiply((2, 3)), 6);
/// assert_eq!(multiply((4, 5)), 20);
///
/// assert_eq!(tracker.total_calls(), 2);
/// println!("{tracker}");
/// ```
#[derive(Clone, Debug)]
pub struct TimerCounter {
    activation: Activation,
    state: Arc<Mutex<TimerCounterState>>,
    platform: PlatformFacade,
}

impl TimerCounter {
    /// Creates a new timer-counter, active and with empty metric maps.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activation: Activation::new(),
            state: Arc::new(Mutex::new(TimerCounterState::default())),
            platform: PlatformFacade::real(),
        }
    }

    /// Creates a new timer-counter with a specific platform.
    ///
    /// This method is primarily used for testing purposes to inject a fake
    /// platform that does not rely on the operating system clocks.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            activation: Activation::new(),
            state: Arc::new(Mutex::new(TimerCounterState::default())),
            platform,
        }
    }

    /// Number of recorded calls for the given name, zero if never observed.
    #[must_use]
    pub fn calls(&self, name: &str) -> u64 {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .counts
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Cumulative runtime recorded for the given name, zero if never observed.
    #[must_use]
    pub fn runtime(&self, name: &str) -> Duration {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .runtimes
            .get(name)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Sum of the call counts over all tracked names.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .counts
            .values()
            .sum()
    }

    /// Sum of the cumulative runtimes over all tracked names.
    #[must_use]
    pub fn total_runtime(&self) -> Duration {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .runtimes
            .values()
            .copied()
            .sum()
    }

    /// Prints the rendered metrics to standard output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        println!("{self}");
    }
}

impl Default for TimerCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for TimerCounter {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&self, active: bool) {
        self.activation.set_active(active);
    }

    fn initialize(&self) {
        let mut state = self.state.lock().expect(ERR_POISONED_LOCK);
        state.counts.clear();
        state.runtimes.clear();
    }

    fn measure(&self, name: &str, call: &mut dyn FnMut()) {
        // Both maps gain the name together; the lock is not held across the
        // call itself.
        self.state.lock().expect(ERR_POISONED_LOCK).seed(name);

        let started = self.platform.monotonic();
        call();
        let elapsed = self.platform.monotonic().saturating_sub(started);

        let mut state = self.state.lock().expect(ERR_POISONED_LOCK);
        state.seed(name);

        let count = state
            .counts
            .get_mut(name)
            .expect("seeded into both maps above");
        *count = count
            .checked_add(1)
            .expect("call count overflows u64 - this indicates an unrealistic scenario");

        let runtime = state
            .runtimes
            .get_mut(name)
            .expect("seeded into both maps above");
        *runtime = runtime
            .checked_add(elapsed)
            .expect("runtime accumulation overflows Duration - this indicates an unrealistic scenario");
    }
}

impl fmt::Display for TimerCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().expect(ERR_POISONED_LOCK);

        writeln!(f, "TimerCounter(")?;

        // Sort names for consistent output.
        let mut sorted: Vec<_> = state.counts.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        for (name, count) in sorted {
            let runtime = state
                .runtimes
                .get(name)
                .copied()
                .unwrap_or(Duration::ZERO);
            writeln!(
                f,
                "[{name}] number of calls : {count} - cumulative runtime : {}",
                runtime_breakdown(runtime)
            )?;
        }

        let total_calls: u64 = state.counts.values().sum();
        let total_runtime: Duration = state.runtimes.values().copied().sum();
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "total number of calls : {total_calls}")?;
        writeln!(f, "total runtime : {}", runtime_breakdown(total_runtime))?;
        write!(f, ")")
    }
}
