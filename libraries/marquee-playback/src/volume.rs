//! Volume control
//!
//! Volume is a linear ratio in [0.0, 1.0] handed straight to the media
//! capability. A ratio of 0 mutes the output; the level itself is kept so it
//! carries over to the next video/audio item.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume ratio (0.0-1.0)
    ratio: f32,

    /// Mute state (preserves volume ratio)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `ratio` - Initial volume, clamped into 0.0-1.0
    pub fn new(ratio: f32) -> Self {
        let ratio = Self::clamp(ratio);
        Self {
            ratio,
            muted: ratio == 0.0,
        }
    }

    /// Set volume ratio, clamped into 0.0-1.0
    ///
    /// Setting a ratio of 0 mutes, anything above unmutes.
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = Self::clamp(ratio);
        self.muted = self.ratio == 0.0;
    }

    /// Get current volume ratio (0.0-1.0)
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Mute audio (preserves volume ratio)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume the media capability should apply
    ///
    /// Returns 0.0 if muted, otherwise the ratio
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.ratio
        }
    }

    // NaN clamps to silence
    fn clamp(ratio: f32) -> f32 {
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
