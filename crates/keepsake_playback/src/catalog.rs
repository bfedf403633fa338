//! Static, ordered catalogs of playable items.

use super::error::CatalogError;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Anything a media device can load.
pub trait Playable: std::fmt::Debug {
    /// Resource URL or path handed to the device.
    fn source(&self) -> &str;

    /// Human-readable label.
    fn label(&self) -> String;
}

/// A music track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Track {
    /// Track title.
    title: String,
    /// Performing artist.
    artist: String,
    /// Audio resource.
    url: String,
    /// Cover image.
    #[serde(default)]
    cover: Option<String>,
}

impl Playable for Track {
    fn source(&self) -> &str {
        &self.url
    }

    fn label(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// A video clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Video {
    /// Display title.
    #[serde(default)]
    title: String,
    /// Video resource.
    url: String,
    /// Poster image shown before playback.
    #[serde(default)]
    thumbnail: Option<String>,
}

impl Playable for Video {
    fn source(&self) -> &str {
        &self.url
    }

    fn label(&self) -> String {
        if self.title.is_empty() {
            self.url.clone()
        } else {
            self.title.clone()
        }
    }
}

/// Non-empty ordered list of playable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog<T> {
    items: Vec<T>,
}

impl<T: Playable> Catalog<T> {
    /// Builds a catalog; fails if `items` is empty.
    #[instrument(skip(items), fields(len = items.len()))]
    pub fn new(items: Vec<T>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { items })
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All items in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items (at least one).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index after `index`, wrapping to the start.
    pub fn wrap_next(&self, index: usize) -> usize {
        (index + 1) % self.items.len()
    }

    /// Index before `index`, wrapping to the end.
    pub fn wrap_previous(&self, index: usize) -> usize {
        (index + self.items.len() - 1) % self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Track {
        Track::new(title.into(), "PUN".into(), format!("/music/{title}.mp3"), None)
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(Catalog::<Track>::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_wrapping_both_directions() {
        let catalog = Catalog::new(vec![track("a"), track("b"), track("c")]).expect("non-empty");
        assert_eq!(catalog.wrap_next(2), 0);
        assert_eq!(catalog.wrap_previous(0), 2);
        assert_eq!(catalog.wrap_next(0), 1);
    }

    #[test]
    fn test_single_item_wraps_to_itself() {
        let catalog = Catalog::new(vec![track("DAY ONE")]).expect("non-empty");
        assert_eq!(catalog.wrap_next(0), 0);
        assert_eq!(catalog.wrap_previous(0), 0);
    }

    #[test]
    fn test_track_label() {
        assert_eq!(track("DAY ONE").label(), "DAY ONE - PUN");
    }

    #[test]
    fn test_video_parses_without_title() {
        let video: Video = toml::from_str(r#"url = "/videos/birthday.mp4""#).expect("valid toml");
        assert_eq!(video.label(), "/videos/birthday.mp4");
        assert_eq!(video.thumbnail(), &None);
    }
}
