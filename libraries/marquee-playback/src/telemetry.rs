//! Telemetry projection
//!
//! Pure derivation of the displayable quantities from a clock state.
//! Elapsed is floored, total is ceiled, so elapsed + remaining may be off
//! from total by one second. Never used to decide transitions.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing state of the live clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockState {
    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,

    /// Total time in milliseconds (0 until known)
    pub total_ms: f64,

    /// When timing last (re)started; `None` while paused
    pub running_since: Option<Instant>,

    /// Carry-over across pauses in milliseconds
    pub accumulated_ms: f64,
}

/// Displayable progress quantities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Telemetry {
    /// elapsed / total, 0 when total is unknown
    pub progress_ratio: f64,

    /// floor(elapsed / 1000)
    pub elapsed_seconds: u64,

    /// max(0, total_seconds - elapsed_seconds)
    pub remaining_seconds: u64,

    /// ceil(total / 1000)
    pub total_seconds: u64,
}

/// Project a clock state onto telemetry
pub fn project(state: &ClockState) -> Telemetry {
    let elapsed = if state.elapsed_ms.is_finite() {
        state.elapsed_ms.max(0.0)
    } else {
        0.0
    };
    let total = if state.total_ms.is_finite() {
        state.total_ms.max(0.0)
    } else {
        0.0
    };

    let progress_ratio = if total > 0.0 {
        (elapsed / total).min(1.0)
    } else {
        0.0
    };

    let elapsed_seconds = (elapsed / 1000.0).floor() as u64;
    let total_seconds = (total / 1000.0).ceil() as u64;

    Telemetry {
        progress_ratio,
        elapsed_seconds,
        remaining_seconds: total_seconds.saturating_sub(elapsed_seconds),
        total_seconds,
    }
}
