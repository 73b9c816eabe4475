/// Simulated video/audio playback
///
/// Stands in for a real decoder: a playing clip advances its position on a
/// tokio task, reports `PositionChanged` every position interval and `Ended`
/// once it reaches its duration.
use crate::config::SimulationSettings;
use marquee_core::{
    MarqueeError, MediaBackend, MediaCapability, MediaSignal, PlayableItem, SignalSink,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Opens a [`SimulatedMedia`] for every video/audio slot
pub struct SimulatedBackend {
    runtime: Handle,
    settings: SimulationSettings,
}

impl SimulatedBackend {
    pub fn new(runtime: Handle, settings: SimulationSettings) -> Self {
        Self { runtime, settings }
    }
}

impl MediaBackend for SimulatedBackend {
    fn open(&mut self, item: &PlayableItem) -> marquee_core::Result<Box<dyn MediaCapability>> {
        if item.source_url.trim().is_empty() {
            return Err(MarqueeError::media(format!(
                "{} has no source to play",
                item.id
            )));
        }

        debug!("Opening simulated {} for {}", item.kind, item.source_url);
        Ok(Box::new(SimulatedMedia::new(
            self.runtime.clone(),
            self.settings.media_duration_secs,
            self.settings.position_interval(),
        )))
    }
}

#[derive(Debug, Default)]
struct Shared {
    position: f64,
    sink: Option<SignalSink>,
}

/// One simulated clip
pub struct SimulatedMedia {
    runtime: Handle,
    duration: f64,
    interval: Duration,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    pub fn new(runtime: Handle, duration: f64, interval: Duration) -> Self {
        Self {
            runtime,
            duration,
            interval,
            shared: Arc::new(Mutex::new(Shared::default())),
            task: None,
        }
    }

    fn shared(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl MediaCapability for SimulatedMedia {
    fn play(&mut self) -> marquee_core::Result<()> {
        if self.is_running() {
            return Ok(());
        }

        {
            let mut shared = self.shared();
            if shared.position >= self.duration {
                shared.position = 0.0;
            }
        }

        let shared = Arc::clone(&self.shared);
        let duration = self.duration;
        let interval = self.interval;
        let step = interval.as_secs_f64();

        self.task = Some(self.runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let (ended, sink) = {
                    let mut shared = shared
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    shared.position = (shared.position + step).min(duration);
                    (shared.position >= duration, shared.sink.clone())
                };

                if let Some(sink) = sink {
                    sink.emit(MediaSignal::PositionChanged);
                    if ended {
                        sink.emit(MediaSignal::Ended);
                    }
                }
                if ended {
                    break;
                }
            }
        }));
        Ok(())
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn set_position(&mut self, seconds: f64) {
        let position = if seconds.is_finite() { seconds } else { 0.0 };
        self.shared().position = position.clamp(0.0, self.duration);
        if let Some(sink) = self.shared().sink.clone() {
            sink.emit(MediaSignal::PositionChanged);
        }
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }

    fn position(&self) -> f64 {
        self.shared().position
    }

    fn set_volume(&mut self, ratio: f32) {
        debug!("Simulated volume {:.2}", ratio);
    }

    fn subscribe(&mut self, sink: SignalSink) {
        self.shared().sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.shared().sink = None;
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        self.stop();
    }
}
