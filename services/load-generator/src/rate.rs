//! Lag-compensating throughput controller
//!
//! Computes pause durations from cumulative schedule deviation rather
//! than a fixed per-iteration delay. Sleeping a fixed interval every
//! iteration drifts under OS scheduling granularity at high per-worker
//! rates; here any iteration that ran faster or slower than ideal
//! adjusts the next pause, so the long-run rate converges to the
//! target.

use std::time::Duration;

/// Lead time below which no pause is issued, in milliseconds.
pub const MIN_PAUSE_MS: u64 = 1;

/// Throughput controller for one worker.
#[derive(Debug, Clone, Copy)]
pub struct RateScheduler {
    target_rate: u64,
}

impl RateScheduler {
    /// Create a scheduler for a target rate in events/sec.
    pub fn new(target_rate: u64) -> Self {
        Self { target_rate }
    }

    /// Target rate in events/sec.
    pub fn target_rate(&self) -> u64 {
        self.target_rate
    }

    /// Decide how long the caller must pause, given how many events it
    /// has sent over `elapsed`.
    ///
    /// Returns zero when the caller is on or behind schedule, or ahead
    /// by no more than [`MIN_PAUSE_MS`] of lead time. Never negative.
    pub fn pause_for(&self, sent_count: u64, elapsed: Duration) -> Duration {
        if self.target_rate == 0 {
            return Duration::ZERO;
        }

        // How many events should have been sent by now at the target rate.
        let target_sent =
            (elapsed.as_nanos() * u128::from(self.target_rate) / 1_000_000_000) as u64;
        let ahead_count = sent_count.saturating_sub(target_sent);
        let ahead_ms = ahead_count * 1_000 / self.target_rate;

        if ahead_ms > MIN_PAUSE_MS {
            Duration::from_millis(ahead_ms)
        } else {
            Duration::ZERO
        }
    }
}
