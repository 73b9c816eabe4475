/// Host loop
///
/// Owns the controller on one task: a heartbeat drives the image clock,
/// capability signals arrive over a channel, and both are handled in turn
/// with the transport calls, never concurrently.
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::simulated::SimulatedBackend;
use marquee_core::{Catalog, MediaId, SignalDispatch};
use marquee_playback::{PlaybackController, PlaybackEvent, PlaylistResolver, TimeSource};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Time source that follows the tokio clock (pausable in tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTime;

impl TimeSource for TokioTime {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// What a run went through
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Items that entered the "now playing" slot, in order
    pub visited: Vec<MediaId>,

    /// Index changes after the initial load
    pub item_changes: usize,

    /// Items that completed
    pub finished: usize,
}

/// Play `playlist` until `cycles` item changes happened (0 = no limit) or
/// `shutdown` resolves
pub async fn run(
    config: &PlayerConfig,
    catalog: Arc<dyn Catalog>,
    playlist: &str,
    cycles: usize,
    shutdown: impl Future<Output = ()>,
) -> Result<RunSummary> {
    config.validate()?;

    let (tx, mut signals) = mpsc::unbounded_channel();
    let dispatch: SignalDispatch = Arc::new(move |signal| {
        // The receiver only goes away when the loop has ended
        let _ = tx.send(signal);
    });

    let backend = SimulatedBackend::new(Handle::current(), config.simulation.clone());
    let mut controller = PlaybackController::new(
        config.playback.clone(),
        PlaylistResolver::new(catalog),
        Box::new(backend),
        dispatch,
    )
    .with_time_source(Arc::new(TokioTime));

    controller.open(playlist).await?;

    let mut summary = RunSummary::default();
    handle_events(&mut controller, &mut summary, config.simulation.skip_unplayable);

    if controller.is_empty() {
        info!("Playlist {} is empty; nothing to play", playlist);
        controller.close();
        return Ok(summary);
    }

    let mut heartbeat = tokio::time::interval(config.playback.poll_interval());
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    while cycles == 0 || summary.item_changes < cycles {
        tokio::select! {
            _ = heartbeat.tick() => controller.tick(),
            Some(signal) = signals.recv() => controller.handle_signal(signal),
            () = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
        handle_events(&mut controller, &mut summary, config.simulation.skip_unplayable);
    }

    controller.close();
    info!(
        "Stopped after {} item changes ({} completed)",
        summary.item_changes, summary.finished
    );
    Ok(summary)
}

fn handle_events(
    controller: &mut PlaybackController,
    summary: &mut RunSummary,
    skip_unplayable: bool,
) {
    let mut skip = false;

    for event in controller.drain_events() {
        match event {
            PlaybackEvent::Loading { playlist_id } => debug!("Loading playlist {}", playlist_id),
            PlaybackEvent::SessionLoaded { playlist_id, count } => {
                info!("Playlist {} loaded with {} items", playlist_id, count);
            }
            PlaybackEvent::StateChanged { playing } => {
                info!("{}", if playing { "Playing" } else { "Paused" });
            }
            PlaybackEvent::ItemChanged {
                index,
                item_id,
                previous_item_id,
            } => {
                info!("Now playing #{} {}", index, item_id);
                if previous_item_id.is_some() {
                    summary.item_changes += 1;
                }
                summary.visited.push(item_id);
            }
            PlaybackEvent::ItemFinished { item_id } => {
                debug!("Finished {}", item_id);
                summary.finished += 1;
            }
            PlaybackEvent::Progress(t) => debug!(
                "{}s / {}s ({:.0}%)",
                t.elapsed_seconds,
                t.total_seconds,
                t.progress_ratio * 100.0
            ),
            PlaybackEvent::VolumeChanged { ratio, is_muted } => {
                info!("Volume {:.2} (muted: {})", ratio, is_muted);
            }
            PlaybackEvent::Stalled { item_id, kind } => {
                warn!("{} ({}) cannot be presented", item_id, kind);
                skip = true;
            }
            PlaybackEvent::Error { message } => {
                warn!("Playback error: {}", message);
                skip = true;
            }
        }
    }

    if skip && skip_unplayable {
        info!("Skipping unplayable item");
        controller.next();
        controller.play();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;
    use marquee_core::{CatalogEntry, InMemoryCatalog, MediaKind, OrderingEntry};

    fn test_config() -> PlayerConfig {
        let mut config = PlayerConfig::default();
        config.playback.image_duration_ms = 1000;
        config.simulation.media_duration_secs = 2.0;
        config
    }

    fn catalog(items: &[(&str, &str, MediaKind)]) -> Arc<dyn Catalog> {
        let mut catalog = InMemoryCatalog::new();
        let mut ordering = Vec::new();
        for (order, (id, url, kind)) in items.iter().enumerate() {
            catalog.add_media(CatalogEntry::new(*id, id.to_uppercase(), *url, *kind));
            ordering.push(OrderingEntry::new(*id, order as i32));
        }
        catalog.add_playlist("lobby", ordering);
        Arc::new(catalog)
    }

    fn ids(summary: &RunSummary) -> Vec<&str> {
        summary.visited.iter().map(MediaId::as_str).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn runs_mixed_playlist_in_order() {
        let catalog = catalog(&[
            ("poster", "/m/poster.png", MediaKind::Image),
            ("trailer", "/m/trailer.mp4", MediaKind::Video),
            ("jingle", "/m/jingle.mp3", MediaKind::Audio),
        ]);

        let started = tokio::time::Instant::now();
        let summary = run(&test_config(), catalog, "lobby", 3, std::future::pending())
            .await
            .unwrap();

        assert_eq!(ids(&summary), vec!["poster", "trailer", "jingle", "poster"]);
        assert_eq!(summary.item_changes, 3);
        assert_eq!(summary.finished, 3);

        // 1 s image + 2 s video + 2 s audio
        let elapsed = started.elapsed();
        assert!(elapsed >= std::time::Duration::from_secs(5));
        assert!(elapsed < std::time::Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn skips_unsupported_and_failing_items() {
        let catalog = catalog(&[
            ("flyer", "/m/flyer.pdf", MediaKind::Unsupported),
            ("broken", "", MediaKind::Video),
            ("poster", "/m/poster.png", MediaKind::Image),
        ]);

        let summary = run(&test_config(), catalog, "lobby", 2, std::future::pending())
            .await
            .unwrap();

        assert_eq!(ids(&summary), vec!["flyer", "broken", "poster"]);
        assert_eq!(summary.finished, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_playlist_returns_immediately() {
        let catalog: Arc<dyn Catalog> =
            Arc::new(InMemoryCatalog::new().with_playlist("lobby", vec![]));

        let summary = run(&test_config(), catalog, "lobby", 0, std::future::pending())
            .await
            .unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_playlist_is_an_error() {
        let catalog: Arc<dyn Catalog> = Arc::new(InMemoryCatalog::new());
        let result = run(&test_config(), catalog, "lobby", 0, std::future::pending()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_an_endless_run() {
        let catalog = catalog(&[("poster", "/m/poster.png", MediaKind::Image)]);
        let shutdown = tokio::time::sleep(std::time::Duration::from_millis(2500));

        let summary = run(&test_config(), catalog, "lobby", 0, shutdown)
            .await
            .unwrap();
        assert_eq!(summary.item_changes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_poll_interval_is_rejected_before_running() {
        let catalog = catalog(&[("poster", "/m/poster.png", MediaKind::Image)]);
        let mut config = test_config();
        config.playback.poll_interval_ms = 0;

        let result = run(&config, catalog, "lobby", 1, std::future::pending()).await;
        assert!(matches!(result, Err(PlayerError::Config(_))));
    }
}
