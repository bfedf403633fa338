//! Site configuration: game settings and the static media catalogs.

use derive_getters::Getters;
use derive_more::{Display, Error};
use keepsake_memory::{KindSet, SymbolKind};
use keepsake_playback::{Catalog, Track, Video, Volume};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Complete configuration, usually read from `keepsake.toml`.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Memory game settings.
    #[serde(default)]
    memory: MemoryConfig,

    /// Background music.
    #[serde(default)]
    music: MusicConfig,

    /// Video player.
    #[serde(default)]
    video: VideoConfig,

    /// Photo timeline entries shown alongside the game.
    #[serde(default = "default_timeline")]
    timeline: Vec<TimelineEntry>,
}

/// Memory game settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Symbol kinds dealt, two cards each.
    #[serde(default = "default_kinds")]
    kinds: Vec<SymbolKind>,

    /// How long a mismatched pair stays visible, in milliseconds.
    #[serde(default = "default_mismatch_delay_ms")]
    mismatch_delay_ms: u64,
}

/// Background music settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Starting volume in `[0, 1]`.
    #[serde(default = "default_music_volume")]
    volume: f32,

    /// Track list, played in order.
    #[serde(default = "default_tracks")]
    tracks: Vec<Track>,
}

/// Video player settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Starting volume in `[0, 1]`.
    #[serde(default = "default_video_volume")]
    volume: f32,

    /// Videos, played in order.
    #[serde(default = "default_videos")]
    videos: Vec<Video>,
}

/// One photo on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Free-form date label.
    date: String,
    /// Caption title.
    title: String,
    /// Caption body.
    #[serde(default)]
    description: String,
    /// Photo location.
    image_url: String,
}

#[instrument]
fn default_kinds() -> Vec<SymbolKind> {
    SymbolKind::all()
}

#[instrument]
fn default_mismatch_delay_ms() -> u64 {
    1000
}

#[instrument]
fn default_music_volume() -> f32 {
    0.5
}

#[instrument]
fn default_video_volume() -> f32 {
    0.7
}

#[instrument]
fn default_tracks() -> Vec<Track> {
    vec![Track::new(
        "DAY ONE".to_string(),
        "PUN".to_string(),
        "/music/PUN - DAY ONE.mp3".to_string(),
        Some(
            "https://images.pexels.com/photos/1616470/pexels-photo-1616470.jpeg".to_string(),
        ),
    )]
}

#[instrument]
fn default_videos() -> Vec<Video> {
    vec![Video::new(
        "Happy Birthday".to_string(),
        "/videos/birthday.mp4".to_string(),
        None,
    )]
}

#[instrument]
fn default_timeline() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry {
            date: "Jan 2022".to_string(),
            title: "The First Meeting".to_string(),
            description: "The day our paths crossed at that coffee shop.".to_string(),
            image_url: "https://images.pexels.com/photos/1855214/pexels-photo-1855214.jpeg"
                .to_string(),
        },
        TimelineEntry {
            date: "Feb 2022".to_string(),
            title: "First Official Date".to_string(),
            description: "We talked until they closed the place.".to_string(),
            image_url: "https://images.pexels.com/photos/5933665/pexels-photo-5933665.jpeg"
                .to_string(),
        },
        TimelineEntry {
            date: "Apr 2022".to_string(),
            title: "Weekend Getaway".to_string(),
            description: "Lost on the coast, found a hidden beach.".to_string(),
            image_url: "https://images.pexels.com/photos/5353910/pexels-photo-5353910.jpeg"
                .to_string(),
        },
    ]
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            kinds: default_kinds(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume: default_music_volume(),
            tracks: default_tracks(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            volume: default_video_volume(),
            videos: default_videos(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            memory: MemoryConfig::default(),
            music: MusicConfig::default(),
            video: VideoConfig::default(),
            timeline: default_timeline(),
        }
    }
}

impl SiteConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Loads `path` if it exists, otherwise the built-in defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            kinds = config.memory.kinds.len(),
            tracks = config.music.tracks.len(),
            videos = config.video.videos.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kind_set()?;
        self.music_catalog()?;
        self.video_catalog()?;
        Ok(())
    }

    /// Validated kind set for the memory game.
    pub fn kind_set(&self) -> Result<KindSet, ConfigError> {
        KindSet::new(self.memory.kinds.clone())
            .map_err(|e| ConfigError::new(format!("Invalid memory.kinds: {}", e)))
    }

    /// Mismatch display delay.
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.memory.mismatch_delay_ms)
    }

    /// Music catalog.
    pub fn music_catalog(&self) -> Result<Catalog<Track>, ConfigError> {
        Catalog::new(self.music.tracks.clone())
            .map_err(|e| ConfigError::new(format!("Invalid music.tracks: {}", e)))
    }

    /// Video catalog.
    pub fn video_catalog(&self) -> Result<Catalog<Video>, ConfigError> {
        Catalog::new(self.video.videos.clone())
            .map_err(|e| ConfigError::new(format!("Invalid video.videos: {}", e)))
    }

    /// Starting music volume.
    pub fn music_volume(&self) -> Volume {
        Volume::new(self.music.volume)
    }

    /// Starting video volume.
    pub fn video_volume(&self) -> Volume {
        Volume::new(self.video.volume)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
