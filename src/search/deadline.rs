//! Deadline oracle and the timeout signal
//!
//! The search is synchronous and single-threaded. Running out of time is
//! reported by returning [`SearchTimeout`] from the frame that noticed it,
//! and every caller forwards it with `?`. That unwinds the in-flight
//! iteration without computing a partial value.

use std::time::{Duration, Instant};

use thiserror::Error;

/// Raised when the time remaining drops below the configured threshold.
///
/// This is an expected outcome of a timed search, not a failure. It never
/// escapes [`crate::AIEngine::decide_move`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search deadline exceeded")]
pub struct SearchTimeout;

/// Read-only source of "milliseconds remaining" for one search call.
pub trait Deadline {
    /// Milliseconds left before the move must be returned
    fn time_left_ms(&self) -> f64;

    /// `Err(SearchTimeout)` once fewer than `threshold_ms` remain
    #[inline]
    fn check(&self, threshold_ms: f64) -> Result<(), SearchTimeout> {
        if self.time_left_ms() < threshold_ms {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }
}

impl<F> Deadline for F
where
    F: Fn() -> f64,
{
    #[inline]
    fn time_left_ms(&self) -> f64 {
        self()
    }
}

/// Wall-clock deadline started at construction
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
    limit: Duration,
}

impl Timer {
    /// Start a timer that expires after `limit`
    #[must_use]
    pub fn start(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::start(Duration::from_millis(ms))
    }

    /// Time since the timer started
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Deadline for Timer {
    fn time_left_ms(&self) -> f64 {
        let elapsed = self.start.elapsed();
        self.limit.as_secs_f64() * 1000.0 - elapsed.as_secs_f64() * 1000.0
    }
}

/// Deadline that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl Deadline for Unlimited {
    #[inline]
    fn time_left_ms(&self) -> f64 {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_deadline() {
        let plenty = || 500.0;
        assert_eq!(plenty.time_left_ms(), 500.0);
        assert!(plenty.check(10.0).is_ok());

        let nearly_out = || 3.0;
        assert_eq!(nearly_out.check(10.0), Err(SearchTimeout));
    }

    #[test]
    fn test_timer_counts_down() {
        let timer = Timer::from_millis(60_000);
        let left = timer.time_left_ms();
        assert!(left <= 60_000.0 && left > 59_000.0);
        assert!(timer.check(10.0).is_ok());

        let expired = Timer::start(Duration::ZERO);
        assert!(expired.time_left_ms() <= 0.0);
        assert!(expired.check(0.5).is_err());
    }

    #[test]
    fn test_unlimited_never_fires() {
        assert!(Unlimited.check(f64::MAX).is_ok());
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(SearchTimeout.to_string(), "search deadline exceeded");
    }
}
