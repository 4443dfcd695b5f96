//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::ERR_POISONED_LOCK;
use crate::pal::abstractions::Platform;

/// Internal state for the fake platform that can be shared between clones.
#[derive(Debug)]
struct FakePlatformState {
    monotonic: Duration,
    timestamp: DateTime<Utc>,
}

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the clock readings instead of
/// relying on the operating system. Multiple clones of the same `FakePlatform`
/// share the same underlying state, allowing tests to modify readings after
/// platform creation to simulate time progression.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    /// Creates a new fake platform with a zero monotonic reading and a
    /// timestamp at the Unix epoch.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                monotonic: Duration::ZERO,
                timestamp: DateTime::UNIX_EPOCH,
            })),
        }
    }

    /// Sets the monotonic clock reading.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// time progression during measurement.
    pub(crate) fn set_monotonic(&self, reading: Duration) {
        self.state.lock().expect(ERR_POISONED_LOCK).monotonic = reading;
    }

    /// Sets the wall-clock timestamp.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn set_timestamp(&self, timestamp: DateTime<Utc>) {
        self.state.lock().expect(ERR_POISONED_LOCK).timestamp = timestamp;
    }
}

impl Platform for FakePlatform {
    fn monotonic(&self) -> Duration {
        self.state.lock().expect(ERR_POISONED_LOCK).monotonic
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.state.lock().expect(ERR_POISONED_LOCK).timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_readings() {
        let platform = FakePlatform::new();

        assert_eq!(platform.monotonic(), Duration::ZERO);
        assert_eq!(platform.timestamp(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn sets_monotonic_reading() {
        let platform = FakePlatform::new();
        platform.set_monotonic(Duration::from_millis(150));

        assert_eq!(platform.monotonic(), Duration::from_millis(150));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        // Setting readings on one clone affects the other.
        platform1.set_monotonic(Duration::from_millis(100));
        assert_eq!(platform2.monotonic(), Duration::from_millis(100));

        let timestamp = DateTime::UNIX_EPOCH + chrono::TimeDelta::seconds(42);
        platform2.set_timestamp(timestamp);
        assert_eq!(platform1.timestamp(), timestamp);
    }
}
