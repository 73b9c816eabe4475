//! Core types for playback management

use marquee_core::PlayableItem;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::telemetry::Telemetry;

/// Duration an image stays on screen
pub const DEFAULT_IMAGE_DURATION_MS: u64 = 5000;

/// Poll period of the synthetic image clock
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Controller lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No session loaded
    Idle,

    /// Playlist resolution in flight
    Loading,

    /// Session loaded (possibly empty)
    Ready {
        /// Current index (0 for an empty session)
        index: usize,
        /// Play/pause flag
        playing: bool,
    },
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// How long an image is shown before auto-advance (default: 5000)
    #[serde(default = "default_image_duration_ms")]
    pub image_duration_ms: u64,

    /// Poll period of the image clock (default: 100)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Initial volume ratio, 0.0-1.0 (default: 1.0)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    /// Whether a freshly opened session starts playing (default: true)
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

impl PlaybackConfig {
    /// Image display duration
    pub fn image_duration(&self) -> Duration {
        Duration::from_millis(self.image_duration_ms)
    }

    /// Image clock poll period
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_image_duration_ms() -> u64 {
    DEFAULT_IMAGE_DURATION_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_initial_volume() -> f32 {
    1.0
}

fn default_autoplay() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            image_duration_ms: default_image_duration_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            initial_volume: default_initial_volume(),
            autoplay: default_autoplay(),
        }
    }
}

/// Read-only view of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Item in the "now playing" slot (absent for an empty or idle session)
    pub current_item: Option<PlayableItem>,

    /// Current index
    pub index: usize,

    /// Number of items in the session
    pub count: usize,

    /// Play/pause flag
    pub playing: bool,

    /// Normalized progress, 0.0-1.0
    pub progress_ratio: f64,

    /// Elapsed whole seconds (floor)
    pub elapsed_seconds: u64,

    /// Remaining seconds
    pub remaining_seconds: u64,

    /// Total seconds (ceiling)
    pub total_seconds: u64,

    /// Volume ratio, 0.0-1.0
    pub volume: f32,
}

impl Snapshot {
    pub(crate) fn new(
        current_item: Option<PlayableItem>,
        index: usize,
        count: usize,
        playing: bool,
        telemetry: Telemetry,
        volume: f32,
    ) -> Self {
        Self {
            current_item,
            index,
            count,
            playing,
            progress_ratio: telemetry.progress_ratio,
            elapsed_seconds: telemetry.elapsed_seconds,
            remaining_seconds: telemetry.remaining_seconds,
            total_seconds: telemetry.total_seconds,
            volume,
        }
    }

    /// Telemetry part of the snapshot
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            progress_ratio: self.progress_ratio,
            elapsed_seconds: self.elapsed_seconds,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
        }
    }
}
