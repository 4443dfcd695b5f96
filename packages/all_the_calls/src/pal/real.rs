//! Real platform implementation backed by the operating system clocks.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::pal::abstractions::Platform;

/// Real implementation of the platform abstraction.
///
/// Monotonic readings are measured from the moment the platform was created,
/// which makes the epoch arbitrary but consistent for one platform instance.
#[derive(Debug)]
pub(crate) struct RealPlatform {
    epoch: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn monotonic(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
