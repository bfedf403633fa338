//! Volume with a mute flag kept apart from the level.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Output level plus mute state.
///
/// `level` is the last audible setting and survives muting. Setting the
/// level to zero mutes instead of forgetting it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    level: f32,
    muted: bool,
}

impl Volume {
    /// Level remembered when starting from silence.
    pub const DEFAULT_LEVEL: f32 = 0.5;

    /// Creates a volume at `level`, clamped to `[0, 1]`.
    ///
    /// A zero level starts muted with [`Volume::DEFAULT_LEVEL`] remembered,
    /// so unmuting is always audible.
    pub fn new(level: f32) -> Self {
        let level = clamp_unit(level);
        if level == 0.0 {
            Self {
                level: Self::DEFAULT_LEVEL,
                muted: true,
            }
        } else {
            Self {
                level,
                muted: false,
            }
        }
    }

    /// Remembered level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// True while output is silenced.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level actually sent to the device.
    pub fn effective(&self) -> f32 {
        if self.muted { 0.0 } else { self.level }
    }

    /// Sets the level. Zero mutes and keeps the previous level; anything
    /// above zero is stored and unmutes.
    #[instrument]
    pub fn set(&mut self, level: f32) {
        let level = clamp_unit(level);
        if level == 0.0 {
            self.muted = true;
        } else {
            self.level = level;
            self.muted = false;
        }
    }

    /// Flips the mute flag.
    #[instrument]
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_then_double_toggle_keeps_level() {
        let mut volume = Volume::new(0.5);
        volume.set(0.0);
        volume.toggle_mute();
        volume.toggle_mute();
        assert_eq!(volume.level(), 0.5);
        assert!(volume.is_muted());
        assert_eq!(volume.effective(), 0.0);
    }

    #[test]
    fn test_raise_while_muted_unmutes() {
        let mut volume = Volume::new(0.5);
        volume.toggle_mute();
        volume.set(0.8);
        assert!(!volume.is_muted());
        assert_eq!(volume.effective(), 0.8);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let mut volume = Volume::new(3.0);
        assert_eq!(volume.level(), 1.0);
        volume.set(-1.0);
        assert!(volume.is_muted());
        assert_eq!(volume.level(), 1.0);
    }

    #[test]
    fn test_silent_start_unmutes_to_audible_level() {
        let mut volume = Volume::new(0.0);
        assert!(volume.is_muted());
        assert_eq!(volume.effective(), 0.0);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.effective(), Volume::DEFAULT_LEVEL);
    }
}
