//! Error types for playback management

use marquee_core::{MarqueeError, PlaylistId};
use thiserror::Error;

/// Playback errors
///
/// Only `open` surfaces errors to callers; every transport operation is
/// total over the controller state.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist identifier does not resolve
    #[error("Playlist not found: {0}")]
    NotFound(PlaylistId),

    /// Catalog collaborator failed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Media capability failure (absorbed by the controller, reported via events)
    #[error("Media capability failure: {0}")]
    MediaCapability(String),
}

impl From<MarqueeError> for PlaybackError {
    fn from(err: MarqueeError) -> Self {
        match err {
            MarqueeError::PlaylistNotFound(id) => PlaybackError::NotFound(id),
            MarqueeError::Media(msg) => PlaybackError::MediaCapability(msg),
            MarqueeError::Catalog(msg) => PlaybackError::Catalog(msg),
            other => PlaybackError::Catalog(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
