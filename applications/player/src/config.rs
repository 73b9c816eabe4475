/// Player configuration
use crate::error::{PlayerError, Result};
use marquee_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File read when no `--config` path is given (if present)
pub const DEFAULT_CONFIG_FILE: &str = "marquee.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Behavior of the simulated video/audio capabilities
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Reported duration of every simulated clip
    #[serde(default = "default_media_duration_secs")]
    pub media_duration_secs: f64,

    /// How often a playing clip reports its position
    #[serde(default = "default_position_interval_ms")]
    pub position_interval_ms: u64,

    /// Skip items that stall or fail instead of waiting for an operator
    #[serde(default = "default_skip_unplayable")]
    pub skip_unplayable: bool,
}

impl SimulationSettings {
    pub fn position_interval(&self) -> Duration {
        Duration::from_millis(self.position_interval_ms)
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            media_duration_secs: default_media_duration_secs(),
            position_interval_ms: default_position_interval_ms(),
            skip_unplayable: default_skip_unplayable(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `marquee.toml` is read when
    /// present. `MARQUEE_` variables override both, with `__` between
    /// section and key (`MARQUEE_PLAYBACK__IMAGE_DURATION_MS=8000`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("MARQUEE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(environment);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.image_duration_ms == 0 {
            return Err(PlayerError::Config(
                "playback.image_duration_ms must be greater than 0".to_string(),
            ));
        }
        if self.playback.poll_interval_ms == 0 {
            return Err(PlayerError::Config(
                "playback.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(PlayerError::Config(
                "playback.initial_volume must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !self.simulation.media_duration_secs.is_finite()
            || self.simulation.media_duration_secs <= 0.0
        {
            return Err(PlayerError::Config(
                "simulation.media_duration_secs must be a positive number".to_string(),
            ));
        }
        if self.simulation.position_interval_ms == 0 {
            return Err(PlayerError::Config(
                "simulation.position_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_media_duration_secs() -> f64 {
    10.0
}

fn default_position_interval_ms() -> u64 {
    250
}

fn default_skip_unplayable() -> bool {
    true
}
