//! Timestamped per-invocation call logging.

use std::fmt;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::activation::Activation;
use crate::pal::{Platform, PlatformFacade};
use crate::render::{SEPARATOR, runtime_breakdown};
use crate::{Collector, ERR_POISONED_LOCK};

/// One recorded invocation: wall-clock timestamp at the start of the call,
/// callable name and measured runtime.
///
/// Entries are immutable once recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    name: String,
    runtime: Duration,
}

impl LogEntry {
    /// Wall-clock timestamp captured immediately before the call was invoked.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Name the callable was wrapped under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Measured runtime of this one call.
    #[must_use]
    pub fn runtime(&self) -> Duration {
        self.runtime
    }
}

/// Records one timestamped [`LogEntry`] per invocation of a wrapped callable,
/// with no aggregation in place.
///
/// If two callables are wrapped under the same name, their entries are
/// indistinguishable in the log.
///
/// The log is append-only during measurement; [`sort_by_time`](CallLog::sort_by_time)
/// and [`sort_by_name`](CallLog::sort_by_name) reorder it in place and
/// [`initialize`](CallLog::initialize) clears it. Every exposed copy of the
/// log is a deep copy, so callers can never mutate the live log.
///
/// # Examples
///
/// ```
/// use all_the_calls::{CallLog, Collector};
///
/// let log = CallLog::new();
/// let mut square = log.wrap("square", |x: i64| x * x);
/// let mut cube = log.wrap("cube", |x: i64| x * x * x);
///
/// assert_eq!(square(3), 9);
/// assert_eq!(cube(2), 8);
/// assert_eq!(square(4), 16);
///
/// assert_eq!(log.total_calls(), 3);
/// assert_eq!(log.calls_for("square"), 2);
/// assert_eq!(log.distinct_names(), vec!["cube", "square"]);
///
/// println!("{}", log.chronological());
/// ```
#[derive(Clone, Debug)]
pub struct CallLog {
    activation: Activation,
    entries: Arc<Mutex<Vec<LogEntry>>>,
    platform: PlatformFacade,
}

impl CallLog {
    /// Creates a new call log, active and empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activation: Activation::new(),
            entries: Arc::new(Mutex::new(Vec::new())),
            platform: PlatformFacade::real(),
        }
    }

    /// Creates a new call log with a specific platform.
    ///
    /// This method is primarily used for testing purposes to inject a fake
    /// platform that does not rely on the operating system clocks.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            activation: Activation::new(),
            entries: Arc::new(Mutex::new(Vec::new())),
            platform,
        }
    }

    /// Number of recorded calls; the length of the log.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.entries.lock().expect(ERR_POISONED_LOCK).len() as u64
    }

    /// Sum of the runtimes over all entries.
    #[must_use]
    pub fn total_runtime(&self) -> Duration {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .map(LogEntry::runtime)
            .sum()
    }

    /// Number of entries whose name matches exactly.
    #[must_use]
    pub fn calls_for(&self, name: &str) -> u64 {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .filter(|entry| entry.name == name)
            .count() as u64
    }

    /// Sum of the runtimes of the entries whose name matches exactly.
    #[must_use]
    pub fn runtime_for(&self, name: &str) -> Duration {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .filter(|entry| entry.name == name)
            .map(LogEntry::runtime)
            .sum()
    }

    /// The names present in the log, deduplicated and sorted
    /// lexicographically.
    #[must_use]
    pub fn distinct_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// The entries whose name matches exactly, sorted by ascending timestamp.
    #[must_use]
    pub fn entries_for(&self, name: &str) -> Vec<LogEntry> {
        let mut matching: Vec<LogEntry> = self
            .entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .iter()
            .filter(|entry| entry.name == name)
            .cloned()
            .collect();
        matching.sort_by_key(LogEntry::timestamp);
        matching
    }

    /// A deep copy of the log in its current order.
    ///
    /// Mutating the returned entries has no effect on the live log.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Reorders the log in place by ascending timestamp. Stable for entries
    /// with equal timestamps.
    pub fn sort_by_time(&self) {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .sort_by_key(LogEntry::timestamp);
    }

    /// Reorders the log in place by callable name. Stable for entries with
    /// equal names.
    pub fn sort_by_name(&self) {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Renders the log sorted by time, one line per entry, followed by the
    /// totals.
    ///
    /// The output is deterministic for a given log content.
    #[must_use]
    pub fn chronological(&self) -> String {
        let mut entries = self.entries();
        entries.sort_by_key(LogEntry::timestamp);

        let mut rendered = String::from("CallLog(\n");
        for entry in &entries {
            let _ = writeln!(
                rendered,
                "[{}] function : {} - runtime : {}",
                entry.timestamp,
                entry.name,
                runtime_breakdown(entry.runtime)
            );
        }
        self.render_totals(&mut rendered, &entries);
        rendered
    }

    /// Renders one line per distinct name (alphabetical) with its call count
    /// and cumulative runtime, followed by the totals. No per-call detail.
    #[must_use]
    pub fn by_name_summary(&self) -> String {
        self.render_by_name(false)
    }

    /// Renders the per-name summary with one indented line per matching
    /// entry (sorted by time) showing that entry's runtime.
    #[must_use]
    pub fn by_name_detailed(&self) -> String {
        self.render_by_name(true)
    }

    fn render_by_name(&self, detailed: bool) -> String {
        let entries = self.entries();

        let mut rendered = String::from("CallLog(\n");
        for name in self.distinct_names() {
            let calls = entries.iter().filter(|entry| entry.name == name).count();
            let runtime: Duration = entries
                .iter()
                .filter(|entry| entry.name == name)
                .map(LogEntry::runtime)
                .sum();
            let _ = writeln!(
                rendered,
                "[{name}] number of calls : {calls} - cumulative runtime : {}",
                runtime_breakdown(runtime)
            );

            if detailed {
                for entry in self.entries_for(&name) {
                    let _ = writeln!(
                        rendered,
                        "\t\t[{}] runtime : {}",
                        entry.timestamp,
                        runtime_breakdown(entry.runtime)
                    );
                }
            }
        }
        self.render_totals(&mut rendered, &entries);
        rendered
    }

    /// Prints the per-name summary rendering to standard output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        println!("{}", self.by_name_summary());
    }

    fn render_totals(&self, rendered: &mut String, entries: &[LogEntry]) {
        let total_runtime: Duration = entries.iter().map(LogEntry::runtime).sum();
        let _ = writeln!(rendered, "{SEPARATOR}");
        let _ = writeln!(rendered, "total number of calls : {}", entries.len());
        let _ = writeln!(
            rendered,
            "total runtime : {}",
            runtime_breakdown(total_runtime)
        );
        rendered.push(')');
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for CallLog {
    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn set_active(&self, active: bool) {
        self.activation.set_active(active);
    }

    fn initialize(&self) {
        self.entries.lock().expect(ERR_POISONED_LOCK).clear();
    }

    fn measure(&self, name: &str, call: &mut dyn FnMut()) {
        let timestamp = self.platform.timestamp();

        let started = self.platform.monotonic();
        call();
        let runtime = self.platform.monotonic().saturating_sub(started);

        // The entry is appended only once the call returns; an aborted call
        // leaves the log untouched.
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .push(LogEntry {
                timestamp,
                name: name.to_owned(),
                runtime,
            });
    }
}

/// Delegates to [`by_name_summary`](CallLog::by_name_summary), the default
/// rendering.
impl fmt::Display for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.by_name_summary())
    }
}
