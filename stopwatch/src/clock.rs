use std::time::Duration;
use std::time::Instant;

use thiserror::Error;

/// The monotonic clock cannot be sampled on this host.
#[derive(Debug, Clone, Copy, Error)]
#[error("the monotonic clock cannot be sampled on this host")]
pub struct ClockUnsupported;

/// A source of monotonic time.
///
/// Samples are reported as the [`Duration`] since an arbitrary fixed origin.
/// Implementations never run backward, which makes the difference between two
/// samples safe to interpret as elapsed time.
pub trait Clock {
    /// Sample the clock.
    fn now(&self) -> Duration;
}

/// The production [`Clock`], backed by [`Instant`] and anchored at the moment
/// of creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock anchored at the current instant, verifying that the
    /// platform monotonic source can be sampled.
    pub fn new() -> Result<MonotonicClock, ClockUnsupported> {
        let origin = Instant::now();

        // A second sample behind the first would mean the platform source is
        // not actually monotonic.
        if Instant::now() < origin {
            return Err(ClockUnsupported);
        }

        Ok(MonotonicClock { origin })
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
