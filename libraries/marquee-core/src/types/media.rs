/// Media domain types
use crate::types::MediaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media kind of a playable entry
///
/// The kind alone decides how an entry is timed during playback:
/// images get a synthetic clock, video and audio are timed by the media
/// capability, anything else stalls the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (no native duration signal)
    Image,
    /// Video clip
    Video,
    /// Audio track
    Audio,
    /// Anything the player cannot present
    Unsupported,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "ogg", "m4a", "flac"];

impl MediaKind {
    /// Convert kind to its canonical lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Unsupported => "unsupported",
        }
    }

    /// Whether entries of this kind are timed by a media capability
    pub fn has_native_clock(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }

    /// Infer a kind from a free-text catalog type tag and the source URL
    ///
    /// Resolution order:
    /// 1. `image` / `video` / `audio` substring of the tag (case-insensitive)
    /// 2. file extension of the URL path
    /// 3. localized tag hints (`imagem`, `foto`, `vídeo`, `áudio`)
    ///
    /// Falls back to [`MediaKind::Unsupported`].
    pub fn infer(type_tag: &str, source_url: &str) -> Self {
        let tag = type_tag.to_lowercase();

        if tag.contains("image") {
            return MediaKind::Image;
        }
        if tag.contains("video") {
            return MediaKind::Video;
        }
        if tag.contains("audio") {
            return MediaKind::Audio;
        }

        if let Some(ext) = url_extension(source_url) {
            let ext = ext.as_str();
            if IMAGE_EXTENSIONS.contains(&ext) {
                return MediaKind::Image;
            }
            // Video is checked before audio, so "ogg" resolves to video
            if VIDEO_EXTENSIONS.contains(&ext) {
                return MediaKind::Video;
            }
            if AUDIO_EXTENSIONS.contains(&ext) {
                return MediaKind::Audio;
            }
        }

        if tag.contains("imagem") || tag.contains("foto") {
            return MediaKind::Image;
        }
        if tag.contains("vídeo") {
            return MediaKind::Video;
        }
        if tag.contains("áudio") {
            return MediaKind::Audio;
        }

        MediaKind::Unsupported
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of the last path segment, query and fragment stripped
fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Catalog entry as delivered by the catalog collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique media identifier
    pub id: MediaId,

    /// Name shown by the presentation layer
    pub display_name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Where the renderer fetches the media from
    pub source_url: String,

    /// Resolved media kind
    pub kind: MediaKind,
}

impl CatalogEntry {
    /// Create a new catalog entry without description
    pub fn new(
        id: impl Into<MediaId>,
        display_name: impl Into<String>,
        source_url: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: None,
            source_url: source_url.into(),
            kind,
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordering entry of a playlist: which media, at which position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingEntry {
    /// Referenced media identifier (may not resolve in the catalog)
    pub media_id: MediaId,

    /// Position field; entries play in ascending order
    pub order: i32,
}

impl OrderingEntry {
    /// Create a new ordering entry
    pub fn new(media_id: impl Into<MediaId>, order: i32) -> Self {
        Self {
            media_id: media_id.into(),
            order,
        }
    }
}

/// One resolved playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableItem {
    /// Media identifier
    pub id: MediaId,

    /// Name shown by the presentation layer
    pub display_name: String,

    /// Optional description
    pub description: Option<String>,

    /// Where the renderer fetches the media from
    pub source_url: String,

    /// Media kind (decides the clock strategy)
    pub kind: MediaKind,
}

impl From<CatalogEntry> for PlayableItem {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            display_name: entry.display_name,
            description: entry.description,
            source_url: entry.source_url,
            kind: entry.kind,
        }
    }
}
