//! Event-driven clock for kinds timed by a media capability (video, audio)

use marquee_core::{MediaCapability, SignalSink};
use tracing::debug;

use crate::error::{PlaybackError, Result};
use crate::telemetry::ClockState;

/// Clock driven by position-changed / ended signals of a capability
///
/// Owns the capability for the lifetime of one playlist slot. The
/// subscription is attached on construction and detached by
/// [`NativeClock::teardown`].
pub struct NativeClock {
    capability: Box<dyn MediaCapability>,
    epoch: u64,
    position_ms: f64,
    duration_ms: f64,
    subscribed: bool,
}

impl NativeClock {
    /// Bind a capability to a slot: subscribe its signals and apply the volume
    pub fn attach(mut capability: Box<dyn MediaCapability>, sink: SignalSink, volume: f32) -> Self {
        let epoch = sink.epoch();
        capability.subscribe(sink);
        capability.set_volume(volume);

        Self {
            capability,
            epoch,
            position_ms: 0.0,
            duration_ms: 0.0,
            subscribed: true,
        }
    }

    /// Slot epoch this clock is subscribed for
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the capability subscription is still attached
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Start or resume playback on the capability
    pub fn resume(&mut self) -> Result<()> {
        self.capability
            .play()
            .map_err(|e| PlaybackError::MediaCapability(e.to_string()))
    }

    /// Pause the capability
    pub fn pause(&mut self) {
        self.capability.pause();
    }

    /// Seek to `percent` (already clamped to 0-100)
    ///
    /// Only applied when the duration is known, finite and positive.
    /// Returns whether the position was moved.
    pub fn seek(&mut self, percent: f64) -> bool {
        match known_duration(self.capability.duration()) {
            Some(duration) => {
                self.capability.set_position(percent / 100.0 * duration);
                true
            }
            None => {
                debug!("Ignoring seek to {percent}%: duration not known yet");
                false
            }
        }
    }

    /// Apply an effective volume to the capability
    pub fn set_volume(&mut self, volume: f32) {
        self.capability.set_volume(volume);
    }

    /// Re-read position and duration after a position-changed signal
    pub fn on_position_changed(&mut self) -> ClockState {
        let position = self.capability.position();
        self.position_ms = if position.is_finite() {
            position.max(0.0) * 1000.0
        } else {
            0.0
        };
        self.duration_ms = known_duration(self.capability.duration()).map_or(0.0, |d| d * 1000.0);
        self.state()
    }

    /// Timing state as of the last position-changed signal
    pub fn state(&self) -> ClockState {
        ClockState {
            elapsed_ms: self.position_ms,
            total_ms: self.duration_ms,
            running_since: None,
            accumulated_ms: self.position_ms,
        }
    }

    /// Detach the subscription and stop the capability
    pub fn teardown(&mut self) {
        if self.subscribed {
            self.capability.unsubscribe();
            self.subscribed = false;
        }
        self.capability.pause();
    }
}

impl std::fmt::Debug for NativeClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeClock")
            .field("epoch", &self.epoch)
            .field("position_ms", &self.position_ms)
            .field("duration_ms", &self.duration_ms)
            .field("subscribed", &self.subscribed)
            .finish_non_exhaustive()
    }
}

fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}
