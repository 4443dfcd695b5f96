//! Per-name cumulative runtime tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::activation::Activation;
use crate::pal::{Platform, PlatformFacade};
use crate::render::{SEPARATOR, runtime_breakdown};
use crate::{Collector, ERR_POISONED_LOCK};

/// Accumulates wall-clock runtime of wrapped callables, keyed by callable name.
///
/// If two callables are wrapped under the same name, the `Timer` combines
/// their runtimes.
///
/// One monotonic reading is taken immediately before invoking the callable
/// and one immediately after it returns; the difference is added to the
/// name's accumulator. A call that panics leaves the accumulator unchanged.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use all_the_calls::{Collector, Timer};
///
/// let timer = Timer::new();
/// let mut sum_to = timer.wrap("sum_to", |n: u64| (0..n).sum::<u64>());
///
/// assert_eq!(sum_to(10), 45);
/// assert!(timer.runtime("sum_to") >= Duration::ZERO);
///
/// println!("{timer}");
/// ```
#[derive(Clone, Debug)]
pub struct Timer {
    activation: Activation,
    runtimes: Arc<Mutex<HashMap<String, Duration>>>,
    platform: PlatformFacade,
}

impl Timer {
    /// Creates a new timer, active and with an empty runtime map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activation: Activation::new(),
            runtimes: Arc::new(Mutex::new(HashMap::new())),
            platform: PlatformFacade::real(),
        }
    }

    /// Creates a new timer with a specific platform.
    ///
    /// This method is primarily used for testing purposes to inject a fake
    /// platform that does not rely on the operating system clocks.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            activation: Activation::new(),
            runtimes: Arc::new(Mutex::new(HashMap::new())),
            platform,
        }
    }

    /// Cumulative runtime recorded for the given name, zero if never observed.
    #[must_use]
    pub fn runtime(&self, name: &str) -> Duration {
        self.runtimes
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(name)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Sum of the cumulative runtimes over all tracked names.
    #[must_use]
    pub fn total_runtime(&self) -> Duration {
        self.runtimes
            .lock()
            .expect(ERR_POISONED_LOCK)
            .values()
            .copied()
            .sum()
    }

    /// Prints the rendered runtimes to standard output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        println!("{self}");
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for Timer {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&self, active: bool) {
        self.activation.set_active(active);
    }

    fn initialize(&self) {
        self.runtimes.lock().expect(ERR_POISONED_LOCK).clear();
    }

    fn measure(&self, name: &str, call: &mut dyn FnMut()) {
        // Seed the name before the call; the lock is not held across the
        // call itself.
        self.runtimes
            .lock()
            .expect(ERR_POISONED_LOCK)
            .entry(name.to_owned())
            .or_insert(Duration::ZERO);

        let started = self.platform.monotonic();
        call();
        let elapsed = self.platform.monotonic().saturating_sub(started);

        let mut runtimes = self.runtimes.lock().expect(ERR_POISONED_LOCK);
        let runtime = runtimes.entry(name.to_owned()).or_insert(Duration::ZERO);
        *runtime = runtime
            .checked_add(elapsed)
            .expect("runtime accumulation overflows Duration - this indicates an unrealistic scenario");
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let runtimes = self.runtimes.lock().expect(ERR_POISONED_LOCK);

        writeln!(f, "Timer(")?;

        // Sort names for consistent output.
        let mut sorted: Vec<_> = runtimes.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        for (name, runtime) in sorted {
            writeln!(
                f,
                "[{name}] cumulative runtime : {}",
                runtime_breakdown(*runtime)
            )?;
        }

        let total: Duration = runtimes.values().copied().sum();
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "total runtime : {}", runtime_breakdown(total))?;
        write!(f, ")")
    }
}
