//! One playback session bound to one device.
//!
//! The session keeps what the listener asked for (`is_playing`) apart
//! from what the device last reported ([`DeviceStatus`]). The two are
//! reconciled as device events arrive: a play request made while an item
//! is still loading is carried out once metadata shows up.

use super::catalog::{Catalog, Playable};
use super::device::{DeviceError, DeviceEvent, DeviceStatus, LoadId, MediaDevice};
use super::error::PlaybackError;
use super::volume::Volume;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where to seek.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeekTarget {
    /// Absolute position in seconds.
    Seconds(f64),
    /// Fraction of the item's duration.
    Fraction(f64),
}

/// Notification emitted to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A different (or the same, reloaded) item is now bound.
    ItemChanged {
        /// Catalog index.
        index: usize,
    },
    /// The device could not load or play; playback was stopped.
    PlaybackError {
        /// Catalog index.
        index: usize,
        /// What went wrong.
        message: String,
    },
    /// The item played to its end.
    Ended {
        /// Catalog index.
        index: usize,
    },
}

/// Transport state for one catalog over one exclusively owned device.
#[derive(Debug)]
pub struct PlaybackSession<T, D> {
    catalog: Catalog<T>,
    device: D,
    index: usize,
    wants_playing: bool,
    status: DeviceStatus,
    load: LoadId,
    position: f64,
    duration: f64,
    volume: Volume,
}

impl<T: Playable, D: MediaDevice> PlaybackSession<T, D> {
    /// Creates a paused session with the first item loaded.
    #[instrument(skip(catalog, device), fields(items = catalog.len()))]
    pub fn new(catalog: Catalog<T>, device: D, volume: Volume) -> Self {
        let mut session = Self {
            catalog,
            device,
            index: 0,
            wants_playing: false,
            status: DeviceStatus::Empty,
            load: LoadId::default(),
            position: 0.0,
            duration: 0.0,
            volume,
        };
        let events = session.bind(0);
        debug!(?events, "Session created");
        session
    }

    // ─────────────────────────────────────────────────────────
    //  Item selection
    // ─────────────────────────────────────────────────────────

    /// Binds the item at `index`.
    ///
    /// Out-of-range indices are rejected and the session is left as is.
    #[instrument(skip(self), fields(current = self.index))]
    pub fn select(&mut self, index: usize) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        if index >= self.catalog.len() {
            warn!(index, len = self.catalog.len(), "Rejected out-of-range selection");
            return Err(PlaybackError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        Ok(self.bind(index))
    }

    /// Advances to the next item, wrapping around.
    #[instrument(skip(self), fields(current = self.index))]
    pub fn next(&mut self) -> Vec<PlaybackEvent> {
        let index = self.catalog.wrap_next(self.index);
        self.bind(index)
    }

    /// Steps back to the previous item, wrapping around.
    #[instrument(skip(self), fields(current = self.index))]
    pub fn previous(&mut self) -> Vec<PlaybackEvent> {
        let index = self.catalog.wrap_previous(self.index);
        self.bind(index)
    }

    /// Stops the device, rebinds it and keeps the play intent.
    fn bind(&mut self, index: usize) -> Vec<PlaybackEvent> {
        self.device.stop();
        self.load = self.load.next();
        self.index = index;
        self.position = 0.0;
        self.duration = 0.0;
        self.status = DeviceStatus::Loading;

        let mut events = vec![PlaybackEvent::ItemChanged { index }];
        let Some(item) = self.catalog.get(index) else {
            return events;
        };
        info!(index, load = %self.load, item = %item.label(), "Loading item");

        self.device.set_volume(self.volume.effective());
        if let Err(error) = self.device.load(self.load, item.source()) {
            events.push(self.refuse(error, DeviceStatus::Failed));
        }
        events
    }

    // ─────────────────────────────────────────────────────────
    //  Transport
    // ─────────────────────────────────────────────────────────

    /// Flips between playing and paused.
    #[instrument(skip(self), fields(playing = self.wants_playing, status = %self.status))]
    pub fn toggle_play(&mut self) -> Vec<PlaybackEvent> {
        if self.wants_playing {
            self.pause();
            Vec::new()
        } else {
            self.play()
        }
    }

    /// Requests playback.
    ///
    /// Starts the device now if the item is ready; otherwise the request
    /// is carried out when metadata arrives. A failed item is reloaded.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn play(&mut self) -> Vec<PlaybackEvent> {
        self.wants_playing = true;
        match self.status {
            DeviceStatus::Ready | DeviceStatus::Paused => self.start_device().into_iter().collect(),
            DeviceStatus::Loading => {
                debug!("Play deferred until the item is ready");
                Vec::new()
            }
            DeviceStatus::Playing => Vec::new(),
            DeviceStatus::Empty | DeviceStatus::Failed => self.bind(self.index),
        }
    }

    /// Requests a pause.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn pause(&mut self) {
        self.wants_playing = false;
        if self.status == DeviceStatus::Playing {
            self.device.pause();
            self.status = DeviceStatus::Paused;
        }
    }

    fn start_device(&mut self) -> Option<PlaybackEvent> {
        match self.device.play() {
            Ok(()) => {
                self.status = DeviceStatus::Playing;
                None
            }
            Err(error) => Some(self.refuse(error, DeviceStatus::Ready)),
        }
    }

    /// Drops the play intent after a device failure and reports it.
    fn refuse(&mut self, error: DeviceError, status: DeviceStatus) -> PlaybackEvent {
        warn!(index = self.index, load = %self.load, error = %error, "Playback failed");
        self.wants_playing = false;
        self.status = status;
        PlaybackEvent::PlaybackError {
            index: self.index,
            message: error.to_string(),
        }
    }

    /// Moves the position, clamped to the item's duration.
    ///
    /// Returns the position actually requested from the device.
    #[instrument(skip(self), fields(duration = self.duration))]
    pub fn seek(&mut self, target: SeekTarget) -> f64 {
        let seconds = match target {
            SeekTarget::Seconds(seconds) => seconds,
            SeekTarget::Fraction(fraction) => fraction * self.duration,
        };
        let seconds = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, self.duration)
        };
        self.device.seek(seconds);
        self.position = seconds;
        seconds
    }

    /// Sets the volume, see [`Volume::set`].
    #[instrument(skip(self))]
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set(level);
        self.device.set_volume(self.volume.effective());
    }

    /// Mutes or unmutes without touching the remembered level.
    #[instrument(skip(self), fields(muted = self.volume.is_muted()))]
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.device.set_volume(self.volume.effective());
    }

    // ─────────────────────────────────────────────────────────
    //  Device events
    // ─────────────────────────────────────────────────────────

    /// Applies a device event.
    ///
    /// Events from an earlier load are ignored.
    #[instrument(skip(self), fields(current = %self.load))]
    pub fn handle(&mut self, event: DeviceEvent) -> Vec<PlaybackEvent> {
        if event.load() != self.load {
            debug!(stale = %event.load(), "Ignoring event from a replaced item");
            return Vec::new();
        }

        match event {
            DeviceEvent::MetadataLoaded { duration, .. } => {
                self.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                if self.status == DeviceStatus::Loading {
                    self.status = DeviceStatus::Ready;
                    if self.wants_playing {
                        return self.start_device().into_iter().collect();
                    }
                }
                Vec::new()
            }
            DeviceEvent::TimeUpdate { position, .. } => {
                if position.is_finite() {
                    self.position = position.clamp(0.0, self.duration.max(0.0));
                }
                Vec::new()
            }
            DeviceEvent::Ended { .. } => {
                info!(index = self.index, "Item ended, advancing");
                self.position = self.duration;
                self.status = DeviceStatus::Ready;
                let mut events = vec![PlaybackEvent::Ended { index: self.index }];
                events.extend(self.next());
                events
            }
            DeviceEvent::Failed { reason, .. } => {
                vec![self.refuse(DeviceError::Unavailable(reason), DeviceStatus::Failed)]
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────

    /// The bound item.
    pub fn current(&self) -> &T {
        // `index` only ever holds an index validated against the catalog.
        &self.catalog.items()[self.index]
    }

    /// Index of the bound item.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    /// Play intent.
    pub fn is_playing(&self) -> bool {
        self.wants_playing
    }

    /// Last status reported by the device.
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration in seconds (zero until metadata arrives).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Position as a fraction of duration.
    pub fn progress(&self) -> f64 {
        super::time::progress(self.position, self.duration)
    }

    /// Remembered volume level.
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Level currently sent to the device.
    pub fn effective_volume(&self) -> f32 {
        self.volume.effective()
    }

    /// True while muted.
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Identity of the current load.
    pub fn load_id(&self) -> LoadId {
        self.load
    }

    /// The device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The device, mutably (for pumping events out of it).
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeviceCommand, SimulatedDevice, Track};

    fn track(title: &str) -> Track {
        Track::new(title.into(), "PUN".into(), format!("/music/{title}.mp3"), None)
    }

    fn session(titles: &[&str]) -> PlaybackSession<Track, SimulatedDevice> {
        let catalog = Catalog::new(titles.iter().map(|t| track(t)).collect()).expect("non-empty");
        PlaybackSession::new(catalog, SimulatedDevice::new(60.0), Volume::new(0.5))
    }

    fn pump(session: &mut PlaybackSession<Track, SimulatedDevice>) -> Vec<PlaybackEvent> {
        let events = session.device_mut().take_events();
        events.into_iter().flat_map(|e| session.handle(e)).collect()
    }

    #[test]
    fn test_new_session_is_paused_and_loading() {
        let session = session(&["DAY ONE"]);
        assert!(!session.is_playing());
        assert_eq!(session.status(), DeviceStatus::Loading);
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_play_waits_for_metadata() {
        let mut session = session(&["DAY ONE"]);
        session.toggle_play();
        assert!(session.is_playing());
        assert!(!session.device().is_playing());

        pump(&mut session);
        assert_eq!(session.status(), DeviceStatus::Playing);
        assert!(session.device().is_playing());
        assert_eq!(session.duration(), 60.0);
    }

    #[test]
    fn test_pause_stays_paused_across_load() {
        let mut session = session(&["a", "b"]);
        pump(&mut session);
        session.next();
        pump(&mut session);
        assert!(!session.is_playing());
        assert_eq!(session.status(), DeviceStatus::Ready);
        assert!(!session.device().is_playing());
    }

    #[test]
    fn test_select_out_of_range_rejected() {
        let mut session = session(&["a", "b"]);
        let result = session.select(5);
        assert_eq!(
            result,
            Err(PlaybackError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut session = session(&["a", "b", "c"]);
        let events = session.previous();
        assert_eq!(events, vec![PlaybackEvent::ItemChanged { index: 2 }]);
        assert_eq!(session.current().title(), "c");
    }

    #[test]
    fn test_stale_metadata_ignored() {
        let mut session = session(&["a", "b"]);
        let first = session.load_id();
        session.select(1).expect("in range");

        let stale = DeviceEvent::MetadataLoaded {
            load: first,
            duration: 999.0,
        };
        assert!(session.handle(stale).is_empty());
        assert_eq!(session.duration(), 0.0);
        assert_eq!(session.status(), DeviceStatus::Loading);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut session = session(&["a"]);
        pump(&mut session);
        assert_eq!(session.seek(SeekTarget::Seconds(500.0)), 60.0);
        assert_eq!(session.seek(SeekTarget::Seconds(-3.0)), 0.0);
        assert_eq!(session.seek(SeekTarget::Fraction(0.25)), 15.0);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_blocked_play_reverts_intent() {
        let mut session = session(&["a"]);
        pump(&mut session);
        session
            .device_mut()
            .set_blocked(Some("autoplay policy".to_string()));

        let events = session.toggle_play();
        assert!(matches!(
            events.as_slice(),
            [PlaybackEvent::PlaybackError { index: 0, .. }]
        ));
        assert!(!session.is_playing());

        // Retry once the platform allows it.
        session.device_mut().set_blocked(None);
        assert!(session.toggle_play().is_empty());
        assert_eq!(session.status(), DeviceStatus::Playing);
    }

    #[test]
    fn test_volume_reaches_device() {
        let mut session = session(&["a"]);
        session.set_volume(0.8);
        session.toggle_mute();
        assert_eq!(session.device().level(), 0.0);
        session.toggle_mute();
        assert_eq!(session.device().level(), 0.8);
        assert!(
            session
                .device()
                .commands()
                .contains(&DeviceCommand::Volume(0.8))
        );
    }
}
