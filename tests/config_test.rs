//! Tests for site configuration loading.

use keepsake::SiteConfig;
use keepsake_memory::SymbolKind;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = SiteConfig::default();
    assert_eq!(config.memory().kinds().len(), 8);
    assert_eq!(config.mismatch_delay(), Duration::from_millis(1000));
    assert_eq!(config.music_volume().level(), 0.5);
    assert_eq!(config.video_volume().level(), 0.7);

    let music = config.music_catalog().expect("default tracks");
    assert_eq!(music.len(), 1);
    assert_eq!(music.items()[0].title(), "DAY ONE");
    assert_eq!(music.items()[0].artist(), "PUN");
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = SiteConfig::from_toml("").expect("empty config");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
[memory]
kinds = ["heart", "cake", "moon"]
mismatch_delay_ms = 250

[music]
volume = 0.3

[[music.tracks]]
title = "First"
artist = "Someone"
url = "/music/first.mp3"

[[music.tracks]]
title = "Second"
artist = "Someone"
url = "/music/second.mp3"
cover = "/covers/second.jpg"

[[timeline]]
date = "May 2023"
title = "Picnic"
image_url = "/photos/picnic.jpg"
"#
    )
    .expect("write config");

    let config = SiteConfig::from_file(file.path()).expect("valid config");
    assert_eq!(
        config.memory().kinds(),
        &vec![SymbolKind::Heart, SymbolKind::Cake, SymbolKind::Moon]
    );
    assert_eq!(config.mismatch_delay(), Duration::from_millis(250));
    assert_eq!(config.music_catalog().expect("tracks").len(), 2);
    assert_eq!(config.timeline().len(), 1);
    assert_eq!(config.timeline()[0].description(), "");
    // Untouched sections keep their defaults
    assert_eq!(config.video_catalog().expect("videos").len(), 1);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = SiteConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn test_missing_file_is_error_when_explicit() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = SiteConfig::from_file(dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_empty_track_list_rejected() {
    let err = SiteConfig::from_toml("[music]\ntracks = []\n").expect_err("no tracks");
    assert!(err.message.contains("music.tracks"));
}

#[test]
fn test_duplicate_kind_rejected() {
    let err = SiteConfig::from_toml("[memory]\nkinds = [\"heart\", \"heart\"]\n")
        .expect_err("duplicate kind");
    assert!(err.message.contains("memory.kinds"));
}

#[test]
fn test_unknown_kind_is_parse_error() {
    let err = SiteConfig::from_toml("[memory]\nkinds = [\"dragon\"]\n").expect_err("unknown kind");
    assert!(err.message.contains("parse"));
}
