//! Time source for the control loop.

use embassy_time::Instant;

/// Monotonic clock.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The embassy time driver.
#[cfg(feature = "badge")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "badge")]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
