//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Provides the clocks used by measurement routines.
///
/// This trait abstracts the underlying time sources, allowing for both real
/// implementations (using the operating system clocks) and fake
/// implementations (for testing).
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets a monotonic clock reading, relative to an arbitrary epoch.
    ///
    /// Runtime measurement takes one reading immediately before invoking a
    /// wrapped callable and one immediately after it returns.
    fn monotonic(&self) -> Duration;

    /// Gets the current wall-clock timestamp, as recorded in log entries.
    fn timestamp(&self) -> DateTime<Utc>;
}
