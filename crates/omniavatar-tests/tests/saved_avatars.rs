//! Saved-avatar store tests against a real file, including the CLI paths.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use omniavatar_cli::commands;
use omniavatar_cli::input::{load_profile, write_profile};
use omniavatar_engine::randomize_profile;
use omniavatar_spec::{BackendError, JsonFileProfileStore, ProfileStore, StoreError};

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("avatars.json");
    let profile = randomize_profile(5);

    JsonFileProfileStore::new(&path)
        .save(&profile, "2026-03-01T10:00:00Z")
        .unwrap();

    let reopened = JsonFileProfileStore::new(&path);
    assert_eq!(reopened.load(&profile.id).unwrap(), profile);
    let listed = reopened.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].saved_at, "2026-03-01T10:00:00Z");
}

#[test]
fn test_resave_replaces_in_place() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileProfileStore::new(dir.path().join("avatars.json"));
    let first = randomize_profile(1);
    let second = randomize_profile(2);
    store.save(&first, "t1").unwrap();
    store.save(&second, "t2").unwrap();

    let mut edited = first.clone();
    edited.name = "Edited".to_string();
    store.save(&edited, "t3").unwrap();

    let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);
    assert_eq!(store.load(&first.id).unwrap().name, "Edited");
}

#[test]
fn test_corrupt_file_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avatars.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = JsonFileProfileStore::new(&path).list().unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
    assert_eq!(err.code(), "STORE_004");
}

#[test]
fn test_invalid_profile_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avatars.json");
    let mut store = JsonFileProfileStore::new(&path);
    let mut profile = randomize_profile(3);
    profile.macro_morphs.height = 250.0;
    let err = store.save(&profile, "t").unwrap_err();
    assert_eq!(err.code(), "STORE_002");
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_cli_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("avatars.json");
    let profile_path = dir.path().join("me.json");
    let profile = randomize_profile(11);
    write_profile(&profile, &profile_path).unwrap();

    commands::store::save(&store_path, profile_path.to_str().unwrap()).unwrap();
    commands::store::list(&store_path, true).unwrap();

    let out = dir.path().join("loaded.json");
    commands::store::load(&store_path, &profile.id, out.to_str().unwrap()).unwrap();
    assert_eq!(load_profile(&out).unwrap(), profile);

    commands::store::delete(&store_path, &profile.id).unwrap();
    let err = commands::store::delete(&store_path, &profile.id).unwrap_err();
    assert!(err.to_string().contains("STORE_001"));
}
