//! Unit tests for the state module.
//! File-backed stores run against temporary directories.

#![allow(clippy::unwrap_used)]

use serde_json::{Map, Value, json};

use crate::state::{FileStateStore, MemoryStateStore, StateStore, StoredState};

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryStateStore::default();

    assert_eq!(store.get("missing"), None);

    store.set("answer", json!(42));
    assert_eq!(store.get("answer"), Some(json!(42)));

    store.set("answer", json!("replaced"));
    assert_eq!(store.get("answer"), Some(json!("replaced")));

    store.persist().unwrap();
}

#[test]
fn file_store_starts_empty_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = FileStateStore::open(&path).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.get("anything"), None);
    assert!(!path.exists());
}

#[test]
fn file_store_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut store = FileStateStore::open(&path).unwrap();
    store.set("folder", json!("/tmp/2024-01-01"));
    store.set("nested", json!({"alice": "wonder", "count": 3}));
    store.persist().unwrap();

    let reopened = FileStateStore::open(&path).unwrap();
    assert_eq!(reopened.get("folder"), Some(json!("/tmp/2024-01-01")));
    assert_eq!(
        reopened.get("nested"),
        Some(json!({"alice": "wonder", "count": 3}))
    );
}

#[test]
fn file_store_tolerates_corrupt_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileStateStore::open(&path).unwrap();

    assert_eq!(store.get("anything"), None);
}

#[test]
fn file_store_tolerates_non_object_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileStateStore::open(&path).unwrap();

    assert_eq!(store.get("anything"), None);
}

#[test]
fn persist_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deeply").join("nested").join("state.json");

    let mut store = FileStateStore::open(&path).unwrap();
    store.set("key", json!(true));
    store.persist().unwrap();

    assert!(path.exists());
    let reopened = FileStateStore::open(&path).unwrap();
    assert_eq!(reopened.get("key"), Some(json!(true)));
}

#[test]
fn stored_state_defaults() {
    let state = StoredState::default();

    assert!(state.things.is_empty());
    assert!(state.config.is_empty());
    assert!(!state.initialized);
    assert!(state.deferred.is_empty());
}

#[test]
fn stored_state_round_trips_through_a_store() {
    let mut store = MemoryStateStore::default();

    let mut state = StoredState::default();
    state.things.insert("folder".to_string(), json!("/tmp/demo"));
    state.initialized = true;
    state.deferred.push("install".to_string());
    let mut config = Map::new();
    config.insert("alice".to_string(), Value::String("wonder".to_string()));
    state.config = config;

    state.write(&mut store).unwrap();
    let loaded = StoredState::load(&store);

    assert_eq!(loaded, state);
}

#[test]
fn load_falls_back_to_defaults_on_a_bad_payload() {
    let mut store = MemoryStateStore::default();
    store.set("charm", json!("not an object"));

    let loaded = StoredState::load(&store);

    assert_eq!(loaded, StoredState::default());
}

#[test]
fn load_on_an_empty_store_yields_defaults() {
    let store = MemoryStateStore::default();

    let loaded = StoredState::load(&store);

    assert_eq!(loaded, StoredState::default());
}
