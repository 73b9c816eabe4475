//! Shared test helpers: mock media backend, manual time, signal queue

#![allow(dead_code)]

use async_trait::async_trait;
use marquee_core::{
    Catalog, CatalogEntry, ClockSignal, InMemoryCatalog, MarqueeError, MediaBackend, MediaCapability,
    MediaKind, MediaSignal, OrderingEntry, PlayableItem, PlaylistId, SignalDispatch, SignalSink,
};
use marquee_playback::{ManualTime, PlaybackConfig, PlaybackController, PlaylistResolver};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Observable state of one mock capability
#[derive(Debug, Default)]
pub struct MockMedia {
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f32,
    pub sink: Option<SignalSink>,
    pub play_calls: usize,
    pub fail_play: bool,
}

pub type MediaHandle = Arc<Mutex<MockMedia>>;

struct MockCapability(MediaHandle);

impl MediaCapability for MockCapability {
    fn play(&mut self) -> marquee_core::Result<()> {
        let mut media = self.0.lock().unwrap();
        media.play_calls += 1;
        if media.fail_play {
            return Err(MarqueeError::media("device unavailable"));
        }
        media.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        self.0.lock().unwrap().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.0.lock().unwrap().duration
    }

    fn position(&self) -> f64 {
        self.0.lock().unwrap().position
    }

    fn set_volume(&mut self, ratio: f32) {
        self.0.lock().unwrap().volume = ratio;
    }

    fn subscribe(&mut self, sink: SignalSink) {
        self.0.lock().unwrap().sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.0.lock().unwrap().sink = None;
    }
}

/// Backend handing out mock capabilities; every open is recorded per item id
#[derive(Clone, Default)]
pub struct MockBackend {
    opened: Arc<Mutex<HashMap<String, Vec<MediaHandle>>>>,
    durations: Arc<Mutex<HashMap<String, f64>>>,
    failing: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    /// Duration reported by capabilities opened for `id`
    pub fn set_duration(&self, id: &str, seconds: f64) {
        self.durations.lock().unwrap().insert(id.to_string(), seconds);
    }

    /// Capabilities opened for `id` reject `play()`
    pub fn fail_play_for(&self, id: &str) {
        self.failing.lock().unwrap().push(id.to_string());
    }

    /// Most recent capability opened for `id`
    pub fn latest(&self, id: &str) -> MediaHandle {
        self.opened.lock().unwrap()[id]
            .last()
            .cloned()
            .expect("capability opened")
    }

    /// How many capabilities were opened for `id`
    pub fn open_count(&self, id: &str) -> usize {
        self.opened.lock().unwrap().get(id).map_or(0, Vec::len)
    }
}

impl MediaBackend for MockBackend {
    fn open(&mut self, item: &PlayableItem) -> marquee_core::Result<Box<dyn MediaCapability>> {
        let id = item.id.as_str().to_string();
        let media = MockMedia {
            duration: self.durations.lock().unwrap().get(&id).copied(),
            fail_play: self.failing.lock().unwrap().contains(&id),
            ..MockMedia::default()
        };
        let handle = Arc::new(Mutex::new(media));
        self.opened
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push(Arc::clone(&handle));
        Ok(Box::new(MockCapability(handle)))
    }
}

/// Emit a signal through the subscription a capability currently holds
///
/// Returns false when the capability is unsubscribed.
pub fn emit(media: &MediaHandle, signal: MediaSignal) -> bool {
    let sink = media.lock().unwrap().sink.clone();
    match sink {
        Some(sink) => {
            sink.emit(signal);
            true
        }
        None => false,
    }
}

/// Catalog whose ordering lookup for `stalled` never completes
pub struct StallingCatalog {
    pub inner: InMemoryCatalog,
    pub stalled: &'static str,
}

#[async_trait]
impl Catalog for StallingCatalog {
    async fn media(&self) -> marquee_core::Result<Vec<CatalogEntry>> {
        self.inner.media().await
    }

    async fn playlist_items(
        &self,
        id: &PlaylistId,
    ) -> marquee_core::Result<Option<Vec<OrderingEntry>>> {
        if id.as_str() == self.stalled {
            std::future::pending::<()>().await;
        }
        self.inner.playlist_items(id).await
    }
}

/// Controller wired to mocks, manual time and a signal queue
pub struct Harness {
    pub controller: PlaybackController,
    pub time: ManualTime,
    pub backend: MockBackend,
    pub signals: Arc<Mutex<Vec<ClockSignal>>>,
}

impl Harness {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self::with_config(catalog, PlaybackConfig::default())
    }

    pub fn with_config(catalog: InMemoryCatalog, config: PlaybackConfig) -> Self {
        Self::with_catalog(Arc::new(catalog), config)
    }

    pub fn with_catalog(catalog: Arc<dyn Catalog>, config: PlaybackConfig) -> Self {
        let time = ManualTime::new();
        let backend = MockBackend::default();
        let signals = Arc::new(Mutex::new(Vec::new()));

        let queue = Arc::clone(&signals);
        let dispatch: SignalDispatch = Arc::new(move |s| queue.lock().unwrap().push(s));

        let controller = PlaybackController::new(
            config,
            PlaylistResolver::new(catalog),
            Box::new(backend.clone()),
            dispatch,
        )
        .with_time_source(Arc::new(time.clone()));

        Self {
            controller,
            time,
            backend,
            signals,
        }
    }

    pub fn open(&mut self, playlist: &str) -> marquee_playback::Result<()> {
        block_on(self.controller.open(playlist))
    }

    /// Deliver every queued capability signal to the controller
    pub fn pump(&mut self) {
        let queued: Vec<ClockSignal> = std::mem::take(&mut *self.signals.lock().unwrap());
        for signal in queued {
            self.controller.handle_signal(signal);
        }
    }

    /// Advance time in poll-interval steps, ticking after each step
    pub fn run_ms(&mut self, ms: u64) {
        let mut left = ms;
        while left > 0 {
            let step = left.min(100);
            self.time.advance_ms(step);
            self.controller.tick();
            left -= step;
        }
    }

    pub fn current_id(&self) -> Option<String> {
        self.controller
            .current_item()
            .map(|item| item.id.as_str().to_string())
    }
}

pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

pub fn entry(id: &str, kind: MediaKind) -> CatalogEntry {
    let ext = match kind {
        MediaKind::Image => "png",
        MediaKind::Video => "mp4",
        MediaKind::Audio => "mp3",
        MediaKind::Unsupported => "pdf",
    };
    CatalogEntry::new(id, format!("Item {id}"), format!("/media/{id}.{ext}"), kind)
}

/// Catalog with one playlist "main" holding `items` in the given order
pub fn catalog(items: &[(&str, MediaKind)]) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    let mut ordering = Vec::new();
    for (position, (id, kind)) in items.iter().enumerate() {
        catalog.add_media(entry(id, *kind));
        ordering.push(OrderingEntry::new(*id, position as i32));
    }
    catalog.add_playlist("main", ordering);
    catalog
}

/// n images in playlist "main"
pub fn images(n: usize) -> InMemoryCatalog {
    let ids: Vec<String> = (0..n).map(|i| format!("img{i}")).collect();
    let items: Vec<(&str, MediaKind)> = ids.iter().map(|id| (id.as_str(), MediaKind::Image)).collect();
    catalog(&items)
}
