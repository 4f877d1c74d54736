use ecotools_core::settings::{DarkMode, PreferenceStore};
use ecotools_core::units::UnitsSystem;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let store = PreferenceStore::open(dir.path().join("settings.json"));
    assert_eq!(store.preferences().dark_mode, DarkMode::Disabled);
    assert_eq!(store.preferences().units_system, UnitsSystem::Metric);
}

#[test]
fn test_toggle_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut store = PreferenceStore::open(&path);
    assert_eq!(store.toggle_dark_mode().unwrap(), DarkMode::Enabled);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"darkMode\": \"enabled\""), "{}", content);

    let reopened = PreferenceStore::open(&path);
    assert_eq!(reopened.preferences().dark_mode, DarkMode::Enabled);

    let mut store = reopened;
    assert_eq!(store.toggle_dark_mode().unwrap(), DarkMode::Disabled);
    assert_eq!(PreferenceStore::open(&path).preferences().dark_mode, DarkMode::Disabled);
}

#[test]
fn test_units_preference_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = PreferenceStore::open(&path);
    store.set_units_system(UnitsSystem::Imperial).unwrap();
    assert_eq!(
        PreferenceStore::open(&path).preferences().units_system,
        UnitsSystem::Imperial
    );
}

#[test]
fn test_corrupt_file_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let store = PreferenceStore::open(&path);
    assert_eq!(store.preferences().dark_mode, DarkMode::Disabled);
}
