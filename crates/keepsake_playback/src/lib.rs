//! Single-session media playback coordination.
//!
//! A [`PlaybackSession`] binds one catalog of tracks or videos to one
//! exclusively owned [`MediaDevice`]. Only one item is bound at a time;
//! changing items stops the previous one before the next is loaded.
//!
//! # Example
//!
//! ```
//! use keepsake_playback::{Catalog, PlaybackSession, SimulatedDevice, Track, Volume};
//!
//! let catalog = Catalog::new(vec![Track::new(
//!     "DAY ONE".into(),
//!     "PUN".into(),
//!     "/music/PUN - DAY ONE.mp3".into(),
//!     None,
//! )])
//! .expect("one track");
//! let mut session = PlaybackSession::new(catalog, SimulatedDevice::default(), Volume::new(0.5));
//! session.toggle_play();
//! for event in session.device_mut().take_events() {
//!     session.handle(event);
//! }
//! assert!(session.device().is_playing());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod device;
mod error;
mod session;
mod simulated;
mod time;
mod volume;

pub use catalog::{Catalog, Playable, Track, Video};
pub use device::{DeviceError, DeviceEvent, DeviceStatus, LoadId, MediaDevice};
pub use error::{CatalogError, PlaybackError};
pub use session::{PlaybackEvent, PlaybackSession, SeekTarget};
pub use simulated::{DeviceCommand, SimulatedDevice};
pub use time::{format_clock, progress};
pub use volume::Volume;
