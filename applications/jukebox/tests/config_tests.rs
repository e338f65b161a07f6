//! Configuration loading tests

use jukebox::{AppError, JukeboxConfig};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jukebox.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn full_file_is_loaded() {
    let (_dir, path) = write_config(
        r#"
[library]
extensions = ["flac", "opus"]
follow_links = true
include_hidden = true
max_depth = 3

[playback]
fade_duration_ms = 1000
fade_tick_ms = 25
progress_tick_ms = 500

[logging]
level = "jukebox=debug"
"#,
    );

    let config = JukeboxConfig::load(Some(&path)).unwrap();

    assert_eq!(config.library.extensions, vec!["flac", "opus"]);
    assert!(config.library.follow_links);
    assert!(config.library.include_hidden);
    assert_eq!(config.library.max_depth, Some(3));
    assert_eq!(config.logging.level, "jukebox=debug");

    let engine = config.engine_config();
    assert_eq!(engine.fade_duration, Duration::from_millis(1000));
    assert_eq!(engine.fade_tick, Duration::from_millis(25));
    assert_eq!(engine.progress_tick, Duration::from_millis(500));
    assert_eq!(engine.fade_steps(), 40);
}

#[test]
fn partial_file_keeps_defaults() {
    let (_dir, path) = write_config(
        r#"
[playback]
fade_duration_ms = 4000
"#,
    );

    let config = JukeboxConfig::load(Some(&path)).unwrap();

    assert_eq!(config.playback.fade_duration_ms, 4000);
    assert_eq!(config.playback.fade_tick_ms, 50);
    assert_eq!(config.library.extensions, vec!["mp3", "flac", "ogg", "wav"]);
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_values_fail_validation() {
    let (_dir, path) = write_config(
        r#"
[playback]
fade_tick_ms = 0
"#,
    );

    let config = JukeboxConfig::load(Some(&path)).unwrap();

    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn malformed_file_is_a_config_error() {
    let (_dir, path) = write_config("[playback\nfade_tick_ms = ");

    let result = JukeboxConfig::load(Some(&path));

    assert!(matches!(result, Err(AppError::Config(_))));
}
