//! Playback controller - core orchestration
//!
//! Owns the session (ordered items, current index, play flag), the volume,
//! and the single live clock. Every index change goes through one
//! transition routine that tears the old clock down before the next one is
//! built.

use marquee_core::{
    ClockSignal, MediaBackend, MediaKind, MediaSignal, PlayableItem, PlaylistId, SignalDispatch,
    SignalSink,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    clock::{ClockSource, FixedClock, FixedPoll, NativeClock, SeekOutcome},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    resolver::PlaylistResolver,
    telemetry::{project, Telemetry},
    time::{SystemTime, TimeSource},
    types::{Phase, PlaybackConfig, Snapshot},
    volume::Volume,
};

/// Loaded playlist: immutable item snapshot plus cursor
#[derive(Debug)]
struct Session {
    playlist_id: PlaylistId,
    items: Vec<PlayableItem>,
    index: usize,
    playing: bool,
}

impl Session {
    fn current(&self) -> Option<&PlayableItem> {
        self.items.get(self.index)
    }
}

/// Resets the loading flag when an open completes or is dropped
struct LoadingFlag<'a>(&'a mut bool);

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Forward,
    Back,
}

/// Central playback control
///
/// Single-threaded: ticks and capability signals are delivered as messages
/// through [`PlaybackController::tick`] and
/// [`PlaybackController::handle_signal`]; transport operations never block.
pub struct PlaybackController {
    config: PlaybackConfig,
    resolver: PlaylistResolver,
    backend: Box<dyn MediaBackend>,
    dispatch: SignalDispatch,
    time: Arc<dyn TimeSource>,

    // State
    loading: bool,
    session: Option<Session>,
    volume: Volume,

    // Exactly one live clock; `epoch` identifies the slot it belongs to
    clock: ClockSource,
    epoch: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller
    ///
    /// # Arguments
    /// * `resolver` - Turns playlist ids into ordered items
    /// * `backend` - Opens a media capability per video/audio slot
    /// * `dispatch` - Where capabilities deliver their signals; the host
    ///   feeds them back through [`PlaybackController::handle_signal`]
    pub fn new(
        config: PlaybackConfig,
        resolver: PlaylistResolver,
        backend: Box<dyn MediaBackend>,
        dispatch: SignalDispatch,
    ) -> Self {
        Self {
            volume: Volume::new(config.initial_volume),
            config,
            resolver,
            backend,
            dispatch,
            time: Arc::new(SystemTime),
            loading: false,
            session: None,
            clock: ClockSource::Unsupported,
            epoch: 0,
            pending_events: Vec::new(),
        }
    }

    /// Replace the time source (tests, or hosts with their own clock)
    #[must_use]
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    // ===== Session lifecycle =====

    /// Resolve a playlist and start a fresh session at index 0
    ///
    /// On failure the controller keeps its prior state: the previous session
    /// and its live clock are left untouched.
    ///
    /// # Errors
    /// `NotFound` if the playlist does not resolve, `Catalog` if the catalog fails.
    pub async fn open(&mut self, playlist_id: impl Into<PlaylistId>) -> Result<()> {
        let playlist_id = playlist_id.into();

        self.pending_events.push(PlaybackEvent::Loading {
            playlist_id: playlist_id.clone(),
        });

        let resolved = {
            // Cleared on drop, so a cancelled open leaves the prior phase
            self.loading = true;
            let _loading = LoadingFlag(&mut self.loading);
            self.resolver.load(&playlist_id).await
        };

        match resolved {
            Ok(items) => {
                self.install(playlist_id, items);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to open playlist {}: {}", playlist_id, e);
                Err(e)
            }
        }
    }

    /// Tear the session down and return to idle
    pub fn close(&mut self) {
        self.leave_slot();
        if let Some(session) = self.session.take() {
            info!("Closed playlist {}", session.playlist_id);
        }
    }

    fn install(&mut self, playlist_id: PlaylistId, items: Vec<PlayableItem>) {
        // Old clock goes first; a reload must never leave it ticking
        self.leave_slot();

        let count = items.len();
        info!("Loaded playlist {} with {} items", playlist_id, count);

        self.session = Some(Session {
            playlist_id: playlist_id.clone(),
            items,
            index: 0,
            playing: self.config.autoplay,
        });

        self.pending_events
            .push(PlaybackEvent::SessionLoaded { playlist_id, count });
        self.emit_state_changed();

        if count > 0 {
            self.enter_slot();
            self.emit_item_changed(None);
        }
    }

    // ===== Transport =====

    /// Resume playback
    pub fn play(&mut self) {
        let now = self.time.now();
        let Some(session) = self.session.as_mut().filter(|s| !s.items.is_empty()) else {
            return;
        };
        if session.playing {
            return;
        }

        session.playing = true;
        self.emit_state_changed();

        if let Err(e) = self.clock.resume(now) {
            self.absorb_failure(&e);
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        let now = self.time.now();
        let Some(session) = self.session.as_mut().filter(|s| !s.items.is_empty()) else {
            return;
        };
        if !session.playing {
            return;
        }

        session.playing = false;
        self.clock.pause(now);
        self.emit_state_changed();
    }

    /// Play if paused, pause if playing
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Skip to the next item (wraps to the first)
    pub fn next(&mut self) {
        self.transition(Step::Forward);
    }

    /// Go to the previous item (wraps to the last)
    pub fn prev(&mut self) {
        self.transition(Step::Back);
    }

    /// Seek the current item to `percent` (clamped to 0-100)
    ///
    /// Seeking an image to 100% completes it and advances immediately.
    /// Video/audio seeks are ignored until the capability knows its duration.
    pub fn seek(&mut self, percent: f64) {
        let now = self.time.now();
        let Some(playing) = self.session_playing() else {
            return;
        };

        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };

        match self.clock.seek(percent, now, playing) {
            SeekOutcome::Completed => {
                debug!("Seek to end completes current item");
                self.emit_item_finished();
                self.transition(Step::Forward);
            }
            SeekOutcome::Moved(Some(state)) => {
                self.pending_events
                    .push(PlaybackEvent::Progress(project(&state)));
            }
            SeekOutcome::Moved(None) | SeekOutcome::Ignored => {}
        }
    }

    /// Set the volume ratio (clamped to 0.0-1.0)
    ///
    /// Kept across items; applied to the live video/audio capability if any.
    pub fn set_volume(&mut self, ratio: f32) {
        self.volume.set_ratio(ratio);
        self.apply_volume();
    }

    /// Silence output, keeping the volume ratio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Restore output at the kept volume ratio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    // The level is always kept; only a non-empty session reports it
    fn apply_volume(&mut self) {
        self.clock.set_volume(self.volume.effective());
        if self.session_playing().is_none() {
            return;
        }
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            ratio: self.volume.ratio(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Message delivery =====

    /// Poll the image clock; hosts call this every poll interval
    pub fn tick(&mut self) {
        let now = self.time.now();
        let ClockSource::Fixed(clock) = &mut self.clock else {
            return;
        };

        match clock.poll(now) {
            FixedPoll::Idle => {}
            FixedPoll::Running(state) => {
                self.pending_events
                    .push(PlaybackEvent::Progress(project(&state)));
            }
            FixedPoll::Expired => self.on_clock_expired(),
        }
    }

    /// Deliver a capability signal
    ///
    /// Signals tagged with another slot's epoch come from a detached
    /// subscription and are dropped.
    pub fn handle_signal(&mut self, signal: ClockSignal) {
        if signal.epoch != self.epoch {
            debug!(
                "Discarding {:?} from slot epoch {} (live epoch {})",
                signal.signal, signal.epoch, self.epoch
            );
            return;
        }

        let ClockSource::Native(clock) = &mut self.clock else {
            return;
        };

        match signal.signal {
            MediaSignal::PositionChanged => {
                let state = clock.on_position_changed();
                self.pending_events
                    .push(PlaybackEvent::Progress(project(&state)));
            }
            MediaSignal::Ended => self.on_clock_expired(),
        }
    }

    /// Poll period while an image clock is running, `None` otherwise
    pub fn poll_interval(&self) -> Option<Duration> {
        self.clock.is_armed().then(|| self.config.poll_interval())
    }

    // ===== Queries =====

    /// Lifecycle phase
    pub fn phase(&self) -> Phase {
        if self.loading {
            return Phase::Loading;
        }
        match &self.session {
            Some(session) => Phase::Ready {
                index: session.index,
                playing: session.playing,
            },
            None => Phase::Idle,
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let volume = self.volume.ratio();
        match &self.session {
            Some(session) => Snapshot::new(
                session.current().cloned(),
                session.index,
                session.items.len(),
                session.playing,
                self.telemetry(),
                volume,
            ),
            None => Snapshot::new(None, 0, 0, false, Telemetry::default(), volume),
        }
    }

    /// Current progress telemetry
    pub fn telemetry(&self) -> Telemetry {
        project(&self.clock.state(self.time.now()))
    }

    /// Item in the "now playing" slot
    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.session.as_ref().and_then(Session::current)
    }

    /// Current index (0 without a session)
    pub fn index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.index)
    }

    /// Number of items in the session
    pub fn len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.items.len())
    }

    /// Whether the session is absent or empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Play flag
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.playing)
    }

    /// Volume ratio (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.ratio()
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Live clock (for inspection)
    pub fn clock(&self) -> &ClockSource {
        &self.clock
    }

    /// Slot epoch of the live clock
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ===== Transitions =====

    // Play flag of a non-empty session
    fn session_playing(&self) -> Option<bool> {
        self.session
            .as_ref()
            .filter(|s| !s.items.is_empty())
            .map(|s| s.playing)
    }

    /// Completion of the live clock; advances only while playing
    fn on_clock_expired(&mut self) {
        if !self.is_playing() {
            debug!("Ignoring clock expiry while paused");
            return;
        }
        self.emit_item_finished();
        self.transition(Step::Forward);
    }

    /// The single index-transition routine
    fn transition(&mut self, step: Step) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let count = session.items.len();
        if count == 0 {
            return;
        }
        let previous = session.current().map(|item| item.id.clone());
        let index = session.index;

        self.leave_slot();

        let next_index = match step {
            Step::Forward => (index + 1) % count,
            Step::Back => (index + count - 1) % count,
        };
        if let Some(session) = self.session.as_mut() {
            session.index = next_index;
        }

        self.enter_slot();
        self.emit_item_changed(previous);
    }

    /// Tear down the live clock and retire its epoch
    fn leave_slot(&mut self) {
        let mut clock = std::mem::replace(&mut self.clock, ClockSource::Unsupported);
        clock.teardown();
        debug!("Tore down {} clock of slot epoch {}", clock.name(), self.epoch);
        self.epoch += 1;
    }

    /// Build the clock for the current index; the previous one must be gone
    fn enter_slot(&mut self) {
        let now = self.time.now();
        let Some((item, playing)) = self
            .session
            .as_ref()
            .and_then(|s| s.current().cloned().map(|item| (item, s.playing)))
        else {
            return;
        };

        match item.kind {
            MediaKind::Image => {
                let mut clock = FixedClock::new(self.config.image_duration());
                if playing {
                    clock.resume(now);
                }
                self.clock = ClockSource::Fixed(clock);
            }
            MediaKind::Video | MediaKind::Audio => match self.backend.open(&item) {
                Ok(capability) => {
                    let sink = SignalSink::new(self.epoch, Arc::clone(&self.dispatch));
                    let mut clock = NativeClock::attach(capability, sink, self.volume.effective());
                    let started = if playing { clock.resume() } else { Ok(()) };
                    self.clock = ClockSource::Native(clock);
                    if let Err(e) = started {
                        self.absorb_failure(&e);
                    }
                }
                Err(e) => {
                    self.absorb_failure(&PlaybackError::from(e));
                }
            },
            MediaKind::Unsupported => {
                warn!("Unsupported media kind for item {}; slot stalled", item.id);
                self.pending_events.push(PlaybackEvent::Stalled {
                    item_id: item.id.clone(),
                    kind: item.kind,
                });
            }
        }

        debug!(
            "Entered slot {} ({}) with {} clock, epoch {}",
            self.index(),
            item.id,
            self.clock.name(),
            self.epoch
        );
    }

    /// Capability failures never reach the caller: pause and report
    fn absorb_failure(&mut self, error: &PlaybackError) {
        warn!("Media capability failure: {}", error);
        if let Some(session) = self.session.as_mut() {
            if session.playing {
                session.playing = false;
                self.clock.pause(self.time.now());
                self.emit_state_changed();
            }
        }
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self) {
        let playing = self.is_playing();
        self.pending_events
            .push(PlaybackEvent::StateChanged { playing });
    }

    fn emit_item_changed(&mut self, previous_item_id: Option<marquee_core::MediaId>) {
        if let Some(item) = self.current_item() {
            let event = PlaybackEvent::ItemChanged {
                index: self.index(),
                item_id: item.id.clone(),
                previous_item_id,
            };
            self.pending_events.push(event);
        }
    }

    fn emit_item_finished(&mut self) {
        if let Some(item) = self.current_item() {
            let item_id = item.id.clone();
            self.pending_events
                .push(PlaybackEvent::ItemFinished { item_id });
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("phase", &self.phase())
            .field("clock", &self.clock)
            .field("epoch", &self.epoch)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
