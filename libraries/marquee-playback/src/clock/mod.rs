//! Clock strategies
//!
//! One [`ClockSource`] is alive per playlist slot. It is chosen once from the
//! item's kind when the slot is entered and torn down on every exit path.

mod fixed;
mod native;

pub use fixed::{FixedClock, FixedPoll};
pub use native::NativeClock;

use std::time::Instant;

use crate::error::Result;
use crate::telemetry::ClockState;

/// Outcome of a seek on the live clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// Position moved; carries the new state when it is known immediately
    Moved(Option<ClockState>),

    /// Seek landed on the end of a fixed clock; treat as completion
    Completed,

    /// Nothing to seek (unsupported slot, native duration unknown)
    Ignored,
}

/// Timing strategy of the active slot
#[derive(Debug)]
pub enum ClockSource {
    /// Synthetic polled clock (images)
    Fixed(FixedClock),

    /// Capability-driven clock (video, audio)
    Native(NativeClock),

    /// No clock: no telemetry, no auto-advance
    Unsupported,
}

impl ClockSource {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ClockSource::Fixed(_) => "fixed",
            ClockSource::Native(_) => "native",
            ClockSource::Unsupported => "unsupported",
        }
    }

    /// Whether a fixed poll is armed
    pub fn is_armed(&self) -> bool {
        matches!(self, ClockSource::Fixed(clock) if clock.is_running())
    }

    /// Ensure timing is running
    pub fn resume(&mut self, now: Instant) -> Result<()> {
        match self {
            ClockSource::Fixed(clock) => {
                clock.resume(now);
                Ok(())
            }
            ClockSource::Native(clock) => clock.resume(),
            ClockSource::Unsupported => Ok(()),
        }
    }

    /// Pause timing
    pub fn pause(&mut self, now: Instant) {
        match self {
            ClockSource::Fixed(clock) => clock.pause(now),
            ClockSource::Native(clock) => clock.pause(),
            ClockSource::Unsupported => {}
        }
    }

    /// Seek to `percent` (already clamped to 0-100)
    pub fn seek(&mut self, percent: f64, now: Instant, playing: bool) -> SeekOutcome {
        match self {
            ClockSource::Fixed(clock) => {
                if clock.seek(percent, now, playing) {
                    SeekOutcome::Completed
                } else {
                    SeekOutcome::Moved(Some(clock.state(now)))
                }
            }
            ClockSource::Native(clock) => {
                if clock.seek(percent) {
                    // Telemetry follows once the capability reports the new position
                    SeekOutcome::Moved(None)
                } else {
                    SeekOutcome::Ignored
                }
            }
            ClockSource::Unsupported => SeekOutcome::Ignored,
        }
    }

    /// Apply an effective volume (images have no audio channel)
    pub fn set_volume(&mut self, volume: f32) {
        if let ClockSource::Native(clock) = self {
            clock.set_volume(volume);
        }
    }

    /// Current timing state
    pub fn state(&self, now: Instant) -> ClockState {
        match self {
            ClockSource::Fixed(clock) => clock.state(now),
            ClockSource::Native(clock) => clock.state(),
            ClockSource::Unsupported => ClockState::default(),
        }
    }

    /// Cancel timers and detach subscriptions
    pub fn teardown(&mut self) {
        match self {
            ClockSource::Fixed(clock) => clock.teardown(),
            ClockSource::Native(clock) => clock.teardown(),
            ClockSource::Unsupported => {}
        }
    }
}
