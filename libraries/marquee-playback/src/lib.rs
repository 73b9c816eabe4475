//! Marquee - Playback Management
//!
//! Platform-agnostic playlist sequencing for Marquee.
//!
//! This crate provides:
//! - Playlist resolution (tolerant join of catalog metadata with an ordering list)
//! - One "now playing" slot with play, pause, toggle, seek, next, previous, volume
//! - Per-slot clock strategies: a polled synthetic clock for images and an
//!   event-driven clock for video/audio capabilities
//! - Automatic advance when the active entry completes
//! - Progress telemetry (elapsed, remaining, total, ratio)
//!
//! # Architecture
//!
//! `marquee-playback` has no runtime and no rendering dependency:
//! - The catalog is consumed through `marquee_core::Catalog`
//! - Video/audio playback is consumed through `marquee_core::MediaBackend`
//! - The host delivers a tick every poll interval and forwards capability
//!   signals; both run on the same control flow as the transport calls
//!
//! # Example
//!
//! ```rust
//! use marquee_core::{
//!     CatalogEntry, InMemoryCatalog, MediaBackend, MediaCapability, MediaKind, OrderingEntry,
//!     PlayableItem, SignalDispatch,
//! };
//! use marquee_playback::{PlaybackConfig, PlaybackController, PlaylistResolver};
//! use std::sync::Arc;
//!
//! struct NoMedia;
//!
//! impl MediaBackend for NoMedia {
//!     fn open(&mut self, _: &PlayableItem) -> marquee_core::Result<Box<dyn MediaCapability>> {
//!         Err(marquee_core::MarqueeError::media("no media output"))
//!     }
//! }
//!
//! let catalog = InMemoryCatalog::new()
//!     .with_media(CatalogEntry::new("welcome", "Welcome", "/welcome.png", MediaKind::Image))
//!     .with_playlist("lobby", vec![OrderingEntry::new("welcome", 1)]);
//!
//! let dispatch: SignalDispatch = Arc::new(|_signal| {});
//! let mut controller = PlaybackController::new(
//!     PlaybackConfig::default(),
//!     PlaylistResolver::new(Arc::new(catalog)),
//!     Box::new(NoMedia),
//!     dispatch,
//! );
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! controller.open("lobby").await.unwrap();
//! # });
//! assert_eq!(controller.len(), 1);
//! assert!(controller.is_playing());
//!
//! // Host loop: call tick() every poll interval
//! controller.tick();
//! let snapshot = controller.snapshot();
//! assert_eq!(snapshot.total_seconds, 5);
//! ```

pub mod clock;
mod controller;
mod error;
mod events;
mod resolver;
pub mod telemetry;
pub mod time;
pub mod types;
mod volume;

// Public exports
pub use clock::{ClockSource, SeekOutcome};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use resolver::{tolerant_join, PlaylistResolver};
pub use telemetry::{project, ClockState, Telemetry};
pub use time::{ManualTime, SystemTime, TimeSource};
pub use types::{Phase, PlaybackConfig, Snapshot};
pub use volume::Volume;
