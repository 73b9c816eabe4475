//! Marquee Core
//!
//! Platform-agnostic domain types, traits, and error handling for Marquee.
//!
//! The core crate defines:
//! - **Domain Types**: `PlayableItem`, `CatalogEntry`, `OrderingEntry`, `MediaKind`
//! - **Collaborator Traits**: `Catalog` (metadata source), `MediaCapability` and
//!   `MediaBackend` (the thing that actually decodes and presents video/audio)
//! - **Error Handling**: Unified `MarqueeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use marquee_core::{CatalogEntry, MediaKind, PlayableItem};
//!
//! let entry = CatalogEntry::new("m1", "Welcome slide", "/media/welcome.png", MediaKind::Image);
//! let item = PlayableItem::from(entry);
//!
//! assert_eq!(item.kind, MediaKind::Image);
//! assert_eq!(MediaKind::infer("", "/media/intro.mp4"), MediaKind::Video);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::InMemoryCatalog;
pub use error::{MarqueeError, Result};
pub use traits::{
    Catalog, ClockSignal, MediaBackend, MediaCapability, MediaSignal, SignalDispatch, SignalSink,
};
pub use types::{CatalogEntry, MediaId, MediaKind, OrderingEntry, PlayableItem, PlaylistId};
