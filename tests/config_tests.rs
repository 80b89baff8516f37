//! Option loading and merging from JSON files.

use std::fs;
use std::path::PathBuf;

use halftone::{Channel, ColorMode, GridLayout, HalftoneConfig, HalftoneError};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("halftone-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_merges_over_defaults() {
    let path = write_temp(
        "options.json",
        r#"{
            "gridSize": 4,
            "isAdditive": false,
            "channels": ["red", "lum"],
            "isRadial": true,
            "displacement": { "activeForce": 0.05 }
        }"#,
    );
    let config = HalftoneConfig::load(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.grid_size, 4.0);
    assert_eq!(config.color_mode, ColorMode::Subtractive);
    assert_eq!(config.channels, vec![Channel::Red, Channel::Lum]);
    assert_eq!(config.layout, GridLayout::Radial);
    assert_eq!(config.displacement.active_force, 0.05);
    assert_eq!(config.displacement.hover_force, -0.02);
    assert_eq!(config.friction, 0.06);
}

#[test]
fn test_empty_options_keep_defaults() {
    let path = write_temp("empty.json", "{}");
    let config = HalftoneConfig::load(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config, HalftoneConfig::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = HalftoneConfig::load("/definitely/not/here/options.json").unwrap_err();
    assert!(matches!(err, HalftoneError::Io(_)));
}

#[test]
fn test_malformed_file_is_config_error() {
    let path = write_temp("broken.json", "{ gridSize: ");
    let err = HalftoneConfig::load(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(err, HalftoneError::Config(_)));
    assert!(err.to_string().contains("Invalid halftone options"));
}
