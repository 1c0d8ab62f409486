use profilometer_settings::{Config, MeasurementSystem, SettingsError};
use tempfile::tempdir;

fn customised() -> Config {
    let mut config = Config::default();
    config.measurement.sample_count = 120;
    config.measurement.scan_tick_ms = 5;
    config.measurement.seed = Some(42);
    config.display.decimal_places = 2;
    config.display.show_progress = false;
    config.display.measurement_system = MeasurementSystem::Imperial;
    config
}

#[test]
fn toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lab.toml");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_round_trip_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("lab.json");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn unset_seed_is_omitted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lab.toml");
    Config::default().save_to_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("sample_count = 80"));
    assert!(!content.contains("seed"));
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lab.toml");
    std::fs::write(&path, "[measurement]\nsample_count = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn explicit_path_takes_precedence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lab.json");
    customised().save_to_file(&path).unwrap();

    let loaded = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(loaded.measurement.sample_count, 120);

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        Config::load_or_default(Some(&missing)),
        Err(SettingsError::IoError(_))
    ));
}
