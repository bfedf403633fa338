//! In-process device driven by a virtual clock.
//!
//! Used by the terminal front-end, which has no audio output, and by
//! tests that need to stage device behaviour.

use super::device::{DeviceError, DeviceEvent, LoadId, MediaDevice};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Command received by a [`SimulatedDevice`], recorded for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// `load` with the given id and source.
    Load(LoadId, String),
    /// `play`.
    Play,
    /// `pause`.
    Pause,
    /// `stop`.
    Stop,
    /// `seek` to seconds.
    Seek(f64),
    /// `set_volume` to a level.
    Volume(f32),
}

/// Media device with a virtual clock.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    default_duration: f64,
    durations: HashMap<String, f64>,
    missing: Vec<String>,
    blocked: Option<String>,
    bound: Option<LoadId>,
    duration: f64,
    position: f64,
    playing: bool,
    level: f32,
    queued: Vec<DeviceEvent>,
    commands: Vec<DeviceCommand>,
}

impl SimulatedDevice {
    /// Creates a device where every item lasts `default_duration` seconds.
    pub fn new(default_duration: f64) -> Self {
        Self {
            default_duration,
            durations: HashMap::new(),
            missing: Vec::new(),
            blocked: None,
            bound: None,
            duration: 0.0,
            position: 0.0,
            playing: false,
            level: 1.0,
            queued: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Gives `source` its own duration.
    pub fn with_duration(mut self, source: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(source.into(), seconds);
        self
    }

    /// Makes loads of `source` fail.
    pub fn with_missing(mut self, source: impl Into<String>) -> Self {
        self.missing.push(source.into());
        self
    }

    /// Refuses `play` with the given reason until cleared with `None`.
    pub fn set_blocked(&mut self, reason: Option<String>) {
        self.blocked = reason;
    }

    /// True while producing output.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Last level set.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Commands received so far.
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drains events queued by commands without moving the clock.
    pub fn take_events(&mut self) -> Vec<DeviceEvent> {
        std::mem::take(&mut self.queued)
    }

    /// Moves the clock forward and returns every pending event.
    #[instrument(skip(self))]
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DeviceEvent> {
        let mut events = self.take_events();
        let Some(load) = self.bound else {
            return events;
        };
        if !self.playing {
            return events;
        }

        self.position = (self.position + elapsed.as_secs_f64()).min(self.duration);
        events.push(DeviceEvent::TimeUpdate {
            load,
            position: self.position,
        });
        if self.position >= self.duration {
            debug!(%load, "Simulated item ended");
            self.playing = false;
            events.push(DeviceEvent::Ended { load });
        }
        events
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(180.0)
    }
}

impl MediaDevice for SimulatedDevice {
    fn load(&mut self, load: LoadId, source: &str) -> Result<(), DeviceError> {
        self.commands.push(DeviceCommand::Load(load, source.to_string()));
        self.playing = false;
        self.position = 0.0;
        self.bound = Some(load);

        if self.missing.iter().any(|m| m == source) {
            self.duration = 0.0;
            self.queued.push(DeviceEvent::Failed {
                load,
                reason: format!("{source} not found"),
            });
            return Ok(());
        }

        self.duration = self
            .durations
            .get(source)
            .copied()
            .unwrap_or(self.default_duration);
        self.queued.push(DeviceEvent::MetadataLoaded {
            load,
            duration: self.duration,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        self.commands.push(DeviceCommand::Play);
        if let Some(reason) = &self.blocked {
            return Err(DeviceError::Blocked(reason.clone()));
        }
        if self.bound.is_none() {
            return Err(DeviceError::Unavailable("nothing loaded".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(DeviceCommand::Pause);
        self.playing = false;
    }

    fn stop(&mut self) {
        self.commands.push(DeviceCommand::Stop);
        self.playing = false;
        self.position = 0.0;
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(DeviceCommand::Seek(seconds));
        self.position = seconds.clamp(0.0, self.duration);
    }

    fn set_volume(&mut self, level: f32) {
        self.commands.push(DeviceCommand::Volume(level));
        self.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_queues_metadata() {
        let mut device = SimulatedDevice::new(30.0);
        let load = LoadId::default().next();
        device.load(load, "/a.mp3").expect("load accepted");
        assert_eq!(
            device.take_events(),
            vec![DeviceEvent::MetadataLoaded {
                load,
                duration: 30.0
            }]
        );
    }

    #[test]
    fn test_missing_source_queues_failure() {
        let mut device = SimulatedDevice::new(30.0).with_missing("/gone.mp3");
        let load = LoadId::default().next();
        device.load(load, "/gone.mp3").expect("load accepted");
        assert!(matches!(
            device.take_events().as_slice(),
            [DeviceEvent::Failed { .. }]
        ));
    }

    #[test]
    fn test_advance_runs_to_end() {
        let mut device = SimulatedDevice::new(2.0);
        let load = LoadId::default().next();
        device.load(load, "/a.mp3").expect("load accepted");
        device.take_events();
        device.play().expect("not blocked");

        let events = device.advance(Duration::from_secs(5));
        assert_eq!(
            events,
            vec![
                DeviceEvent::TimeUpdate {
                    load,
                    position: 2.0
                },
                DeviceEvent::Ended { load },
            ]
        );
        assert!(!device.is_playing());
    }

    #[test]
    fn test_blocked_play_refused() {
        let mut device = SimulatedDevice::new(2.0);
        device.set_blocked(Some("autoplay".to_string()));
        device
            .load(LoadId::default().next(), "/a.mp3")
            .expect("load accepted");
        assert!(matches!(device.play(), Err(DeviceError::Blocked(_))));
    }
}
