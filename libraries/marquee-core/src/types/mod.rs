//! Domain types shared by every Marquee crate

mod ids;
mod media;

pub use ids::{MediaId, PlaylistId};
pub use media::{CatalogEntry, MediaKind, OrderingEntry, PlayableItem};
