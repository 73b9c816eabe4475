//! Synthetic clock for kinds without native timing (images)
//!
//! The clock is polled by the controller on every tick. It is "armed" while
//! `running_since` is set; disarming it is what cancels the poll.

use std::time::{Duration, Instant};

use crate::telemetry::ClockState;

/// Result of polling the fixed clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedPoll {
    /// Clock is paused or already expired; the tick is ignored
    Idle,

    /// Clock is running and has not reached its duration
    Running(ClockState),

    /// Clock reached its duration on this tick (reported exactly once)
    Expired,
}

/// Polled, software-simulated clock
#[derive(Debug, Clone)]
pub struct FixedClock {
    total_ms: f64,
    accumulated_ms: f64,
    running_since: Option<Instant>,
}

impl FixedClock {
    /// Create a paused clock at zero
    pub fn new(total: Duration) -> Self {
        Self {
            total_ms: millis(total),
            accumulated_ms: 0.0,
            running_since: None,
        }
    }

    /// Whether the poll is armed
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Carry-over across pauses in milliseconds
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Total duration in milliseconds
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Ensure the clock is running
    ///
    /// Re-entrant: calling it on a running clock keeps the current start
    /// instant, so there is never a second timer.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Pause, folding the running interval into the carry-over
    ///
    /// A second consecutive pause is a no-op.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            let run_ms = millis(now.saturating_duration_since(since));
            self.accumulated_ms = (self.accumulated_ms + run_ms).min(self.total_ms);
        }
    }

    /// Elapsed time in milliseconds at `now`
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        match self.running_since {
            Some(since) => self.accumulated_ms + millis(now.saturating_duration_since(since)),
            None => self.accumulated_ms,
        }
    }

    /// Timing state at `now`, elapsed capped at the total
    pub fn state(&self, now: Instant) -> ClockState {
        ClockState {
            elapsed_ms: self.elapsed_ms(now).min(self.total_ms),
            total_ms: self.total_ms,
            running_since: self.running_since,
            accumulated_ms: self.accumulated_ms,
        }
    }

    /// One poll tick
    ///
    /// On expiry the poll is disarmed and the carry-over reset *before*
    /// reporting, so a late tick can never report expiry again.
    pub fn poll(&mut self, now: Instant) -> FixedPoll {
        if self.running_since.is_none() {
            return FixedPoll::Idle;
        }

        let elapsed = self.elapsed_ms(now);
        if elapsed >= self.total_ms {
            self.running_since = None;
            self.accumulated_ms = 0.0;
            return FixedPoll::Expired;
        }

        FixedPoll::Running(self.state(now))
    }

    /// Seek to `percent` (already clamped to 0-100)
    ///
    /// Returns `true` when the seek lands on the end, which counts as
    /// completion: the clock is disarmed and reset exactly like an expiry.
    /// Otherwise timing restarts from the new position if `playing`.
    pub fn seek(&mut self, percent: f64, now: Instant, playing: bool) -> bool {
        self.accumulated_ms = percent * self.total_ms / 100.0;

        if percent >= 100.0 {
            self.running_since = None;
            self.accumulated_ms = 0.0;
            return true;
        }

        self.running_since = if playing { Some(now) } else { None };
        false
    }

    /// Cancel the poll
    pub fn teardown(&mut self) {
        self.running_since = None;
    }
}

fn millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
