/// Core error types for Marquee
use crate::types::PlaylistId;
use thiserror::Error;

/// Result type alias using `MarqueeError`
pub type Result<T> = std::result::Result<T, MarqueeError>;

/// Core error type for Marquee
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// Playlist identifier does not resolve
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Catalog collaborator failed for a reason other than a missing playlist
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Media capability failed (decode, device, rejected play request)
    #[error("Media error: {0}")]
    Media(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MarqueeError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a media error
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
