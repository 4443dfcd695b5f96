//! Facade over the real and fake platform implementations.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Either the real platform or a fake platform for testing.
///
/// Collectors hold a facade so that tests can substitute controllable clocks
/// without the measurement code knowing the difference.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    /// Uses the real operating system clocks.
    Real(Arc<RealPlatform>),

    /// Uses fake clocks with externally controlled readings.
    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(Arc::new(RealPlatform::new()))
    }

    #[cfg(test)]
    pub(crate) fn fake(fake: FakePlatform) -> Self {
        Self::Fake(fake)
    }
}

impl Platform for PlatformFacade {
    fn monotonic(&self) -> Duration {
        match self {
            Self::Real(real) => real.monotonic(),
            #[cfg(test)]
            Self::Fake(fake) => fake.monotonic(),
        }
    }

    fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Real(real) => real.timestamp(),
            #[cfg(test)]
            Self::Fake(fake) => fake.timestamp(),
        }
    }
}
