//! Marquee Player - headless playlist host
//!
//! Loads a catalog file, drives a [`marquee_playback::PlaybackController`]
//! on the tokio runtime and simulates video/audio playback.

pub mod catalog_file;
pub mod config;
pub mod error;
pub mod runner;
pub mod simulated;

pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use runner::{run, RunSummary, TokioTime};
