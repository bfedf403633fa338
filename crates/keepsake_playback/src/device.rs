//! The seam between a playback session and the thing that makes sound.
//!
//! Commands go down synchronously; what the device learns later
//! (metadata, progress, end of media, failures) comes back as
//! [`DeviceEvent`]s tagged with the [`LoadId`] they belong to.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identity of one `load` on a device.
///
/// Each load gets a fresh id, so events from an item that has since been
/// replaced can be told apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
)]
#[display("load-{_0}")]
pub struct LoadId(u64);

impl LoadId {
    /// Returns the following id.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What the device last reported about the bound item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DeviceStatus {
    /// Nothing loaded.
    Empty,
    /// Load requested, metadata not yet known.
    Loading,
    /// Loaded and stopped.
    Ready,
    /// Producing output.
    Playing,
    /// Paused mid-item.
    Paused,
    /// The item could not be loaded.
    Failed,
}

/// Asynchronous report from a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeviceEvent {
    /// Duration is known and the item can play.
    MetadataLoaded {
        /// Load this event belongs to.
        load: LoadId,
        /// Total length in seconds.
        duration: f64,
    },
    /// Playback position moved.
    TimeUpdate {
        /// Load this event belongs to.
        load: LoadId,
        /// Position in seconds.
        position: f64,
    },
    /// Playback reached the end of the item.
    Ended {
        /// Load this event belongs to.
        load: LoadId,
    },
    /// Loading or decoding failed.
    Failed {
        /// Load this event belongs to.
        load: LoadId,
        /// Device-supplied reason.
        reason: String,
    },
}

impl DeviceEvent {
    /// Load the event belongs to.
    pub fn load(&self) -> LoadId {
        match self {
            DeviceEvent::MetadataLoaded { load, .. }
            | DeviceEvent::TimeUpdate { load, .. }
            | DeviceEvent::Ended { load }
            | DeviceEvent::Failed { load, .. } => *load,
        }
    }
}

/// Synchronous command failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DeviceError {
    /// The resource cannot be reached or decoded.
    #[display("Media unavailable: {}", _0)]
    Unavailable(String),

    /// The platform refused playback (for example an autoplay policy).
    #[display("Playback blocked: {}", _0)]
    Blocked(String),
}

impl std::error::Error for DeviceError {}

/// A playback device exclusively owned by one session.
pub trait MediaDevice {
    /// Stops the current item and binds `source` under `load`.
    fn load(&mut self, load: LoadId, source: &str) -> Result<(), DeviceError>;

    /// Starts or resumes output.
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Pauses output, keeping the position.
    fn pause(&mut self);

    /// Stops output of the bound item.
    fn stop(&mut self);

    /// Moves to `seconds` into the bound item.
    fn seek(&mut self, seconds: f64);

    /// Sets the effective output level in `[0, 1]`.
    fn set_volume(&mut self, level: f32);
}
