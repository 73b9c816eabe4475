/// Collaborator traits for Marquee
use crate::error::Result;
use crate::types::{CatalogEntry, OrderingEntry, PlayableItem, PlaylistId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Catalog collaborator
///
/// Provides the two lists the playlist resolver joins: every known catalog
/// entry, and the ordering list of a single playlist.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Get every catalog entry
    async fn media(&self) -> Result<Vec<CatalogEntry>>;

    /// Get the ordering list of a playlist
    ///
    /// Returns `Ok(None)` when the playlist identifier does not resolve.
    /// An existing playlist without entries returns `Ok(Some(vec![]))`.
    async fn playlist_items(&self, id: &PlaylistId) -> Result<Option<Vec<OrderingEntry>>>;
}

/// Signal raised by a media capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSignal {
    /// Playback position (or duration) changed
    PositionChanged,
    /// Playback reached the end of the media
    Ended,
}

/// A media signal tagged with the playlist slot that subscribed to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSignal {
    /// Slot epoch of the subscription that produced the signal
    pub epoch: u64,
    /// The signal itself
    pub signal: MediaSignal,
}

/// Delivers tagged signals into the host's control flow (usually a channel sender)
pub type SignalDispatch = Arc<dyn Fn(ClockSignal) + Send + Sync>;

/// Subscription endpoint handed to a media capability
///
/// Every signal emitted through a sink carries the epoch of the slot it was
/// created for, so the controller can recognise signals from a detached slot.
#[derive(Clone)]
pub struct SignalSink {
    epoch: u64,
    dispatch: SignalDispatch,
}

impl SignalSink {
    /// Create a sink for the given slot epoch
    pub fn new(epoch: u64, dispatch: SignalDispatch) -> Self {
        Self { epoch, dispatch }
    }

    /// Slot epoch this sink was created for
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Emit a signal
    pub fn emit(&self, signal: MediaSignal) {
        (self.dispatch)(ClockSignal {
            epoch: self.epoch,
            signal,
        });
    }
}

impl fmt::Debug for SignalSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSink")
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Media playback capability for one video/audio item
///
/// Implementers decode and present the media. The playback controller
/// consumes it through this trait only; positions and durations are in
/// seconds.
pub trait MediaCapability: Send {
    /// Start or resume playback
    ///
    /// # Errors
    /// Returns an error if the capability rejects playback (decode or device failure)
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playback position
    fn set_position(&mut self, seconds: f64);

    /// Total duration, `None` until metadata resolves
    fn duration(&self) -> Option<f64>;

    /// Current playback position
    fn position(&self) -> f64;

    /// Set the output volume (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, ratio: f32);

    /// Route position-changed and ended signals into `sink`
    fn subscribe(&mut self, sink: SignalSink);

    /// Detach the current subscription; no signal may be emitted afterwards
    fn unsubscribe(&mut self);
}

/// Factory for media capabilities
pub trait MediaBackend: Send {
    /// Open a capability bound to `item`
    ///
    /// # Errors
    /// Returns an error if the item cannot be opened for playback
    fn open(&mut self, item: &PlayableItem) -> Result<Box<dyn MediaCapability>>;
}
