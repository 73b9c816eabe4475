//! Playback Events
//!
//! Event-based communication for presentation-layer synchronization.
//! Events are emitted at key points:
//! - Session lifecycle (loading, loaded)
//! - Play/pause changes
//! - Item changes (manual or automatic)
//! - Progress updates (every image tick, every capability position signal)
//! - Absorbed failures

use marquee_core::{MediaId, MediaKind, PlaylistId};
use serde::{Deserialize, Serialize};

use crate::telemetry::Telemetry;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playlist resolution started
    Loading {
        /// Playlist being resolved
        playlist_id: PlaylistId,
    },

    /// A fresh session replaced the previous one
    SessionLoaded {
        /// Loaded playlist
        playlist_id: PlaylistId,
        /// Number of items in the session
        count: usize,
    },

    /// Play/pause flag changed
    StateChanged {
        /// New play flag
        playing: bool,
    },

    /// The "now playing" slot moved to another index
    ItemChanged {
        /// New index
        index: usize,
        /// ID of the new (current) item
        item_id: MediaId,
        /// ID of the previous item (absent right after a load)
        previous_item_id: Option<MediaId>,
    },

    /// The current item completed (naturally or by seeking to its end)
    ItemFinished {
        /// ID of the finished item
        item_id: MediaId,
    },

    /// Progress telemetry changed
    Progress(Telemetry),

    /// Volume changed
    VolumeChanged {
        /// New volume ratio (0.0-1.0)
        ratio: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// The current slot cannot be presented and will not advance on its own
    Stalled {
        /// ID of the stalled item
        item_id: MediaId,
        /// Its kind
        kind: MediaKind,
    },

    /// A failure was absorbed (playback paused)
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether this is a progress update
    pub fn is_progress(&self) -> bool {
        matches!(self, PlaybackEvent::Progress(_))
    }
}
