use std::time::{Duration, Instant};

/// Monotonic time source. Readings are offsets from an arbitrary fixed origin,
/// so only differences between two readings are meaningful.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Backed by [`Instant`], which never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Seconds between two readings, clamped at zero.
pub fn elapsed_secs(start: Duration, end: Duration) -> f64 {
    end.saturating_sub(start).as_secs_f64()
}
