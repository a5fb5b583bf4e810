use plotkit_settings::{Config, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plotkit.toml");

    let mut config = Config::new();
    config.timing.tick_ms = 2;
    config.hilbert.image_size_mm = 100.0;
    config.simulator.realtime = true;
    config.save_to_file(&path).expect("Failed to save config");

    let loaded = Config::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[timing]"));
    assert!(text.contains("tick_ms = 2"));
}

#[test]
fn test_json_round_trip_into_nested_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("plotkit.json");

    let mut config = Config::new();
    config.machine.x_pitch_mm = 0.05;
    config.save_to_file(&path).expect("Failed to save config");

    let loaded = Config::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.machine.x_pitch_mm, 0.05);
    assert_eq!(loaded.scheduler_config().units.finest_pitch(), 0.05);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plotkit.yaml");

    let err = Config::new().save_to_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(ref ext) if ext == "yaml"));
    assert!(!path.exists());
}

#[test]
fn test_invalid_file_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plotkit.toml");
    std::fs::write(&path, "[timing]\ntick_ms = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));

    std::fs::write(&path, "[timing\n").unwrap();
    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::TomlError(_)));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.toml");
    let err = Config::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}
