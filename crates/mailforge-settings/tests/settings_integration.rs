//! Settings file integration tests

use mailforge_designer::CanvasSize;
use mailforge_settings::{Config, SettingsError, SettingsPersistence};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.designer.default_canvas_size = CanvasSize::SixByNine;
    config.designer.default_zoom = 150;
    config.branding.app_name = "Coastal Realty Mail".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .contains("default_canvas_size = \"6x9\""));
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut config = Config::default();
    config.designer.show_grid = false;
    config.branding.secondary_color = "#2563EB".to_string();
    config.save_to_file(&path).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[branding]\nprimary_color = \"navy\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_save_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.designer.default_zoom = 10;
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_load_or_default_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = SettingsPersistence::load_or_default(&path).unwrap();
    assert_eq!(settings.config(), &Config::default());

    settings.config_mut().designer.history_limit = 20;
    settings.save().unwrap();

    let reloaded = SettingsPersistence::load_or_default(&path).unwrap();
    assert_eq!(reloaded.config().designer.history_limit, 20);
    assert_eq!(reloaded.config().designer.to_options().history_limit, 20);
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(msg) if msg.contains("absent.toml")));
}

#[test]
fn test_save_reports_unusable_config_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let settings = SettingsPersistence::load_or_default(blocker.join("settings.toml")).unwrap();
    let err = settings.save().unwrap_err();
    assert!(matches!(err, SettingsError::ConfigDirectory(_)));
}
