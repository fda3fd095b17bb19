//! Unit tests for the config module.
//! Pure data in, pure data out; no filesystem or host involved.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use crate::config::{CharmConfig, ConfigError, ConfigSnapshot, changed_options};

fn snapshot(value: Value) -> ConfigSnapshot {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn delta_contains_exactly_new_and_changed_keys() {
    let current = snapshot(json!({
        "kept": "same",
        "changed": "after",
        "added": true,
    }));
    let recorded = snapshot(json!({
        "kept": "same",
        "changed": "before",
        "removed": 7,
    }));

    let delta = changed_options(&current, &recorded);

    assert_eq!(delta.len(), 2);
    assert_eq!(delta.get("changed"), Some(&json!("after")));
    assert_eq!(delta.get("added"), Some(&json!(true)));
    assert!(!delta.contains_key("kept"));
    assert!(!delta.contains_key("removed"));
}

#[test]
fn delta_is_a_subset_of_current() {
    let current = snapshot(json!({"a": 1, "b": [1, 2], "c": {"x": "y"}}));
    let recorded = snapshot(json!({"a": 2, "c": {"x": "z"}}));

    let delta = changed_options(&current, &recorded);

    for (key, value) in &delta {
        assert_eq!(current.get(key), Some(value));
    }
}

#[test]
fn empty_recorded_yields_the_whole_current_snapshot() {
    let current = snapshot(json!({"alice": "x", "count": 3}));

    let delta = changed_options(&current, &ConfigSnapshot::new());

    assert_eq!(delta, current);
}

#[test]
fn empty_current_yields_an_empty_delta() {
    let recorded = snapshot(json!({"a": 1}));

    assert!(changed_options(&ConfigSnapshot::new(), &recorded).is_empty());
    assert!(changed_options(&ConfigSnapshot::new(), &ConfigSnapshot::new()).is_empty());
}

#[test]
fn identical_snapshots_yield_an_empty_delta() {
    let current = snapshot(json!({"alice": "x", "nested": {"deep": [1, 2, 3]}}));

    assert!(changed_options(&current, &current).is_empty());
}

#[test]
fn repeated_computation_yields_identical_results() {
    let current = snapshot(json!({"a": "x", "b": 2}));
    let recorded = snapshot(json!({"a": "y"}));

    let first = changed_options(&current, &recorded);
    let second = changed_options(&current, &recorded);

    assert_eq!(first, second);
}

#[test]
fn demo_scenario_reports_changed_and_new_options() {
    let current = snapshot(json!({"alice": "x", "bobob": "y", "message": "hi"}));
    let recorded = snapshot(json!({"alice": "x", "bobob": "z"}));

    let delta = changed_options(&current, &recorded);

    assert_eq!(delta, snapshot(json!({"bobob": "y", "message": "hi"})));
}

#[test]
fn keys_only_in_recorded_produce_nothing() {
    let recorded = snapshot(json!({"a": 1}));

    assert!(changed_options(&ConfigSnapshot::new(), &recorded).is_empty());
}

#[test]
fn values_of_different_types_count_as_changed() {
    let current = snapshot(json!({"n": 1}));
    let recorded = snapshot(json!({"n": "1"}));

    let delta = changed_options(&current, &recorded);

    assert_eq!(delta.get("n"), Some(&json!(1)));
}

#[test]
fn compound_values_are_compared_deeply() {
    let current = snapshot(json!({"limits": {"cpu": 2, "mem": "1G"}}));
    let same = snapshot(json!({"limits": {"cpu": 2, "mem": "1G"}}));
    let different = snapshot(json!({"limits": {"cpu": 2, "mem": "2G"}}));

    assert!(changed_options(&current, &same).is_empty());
    assert_eq!(
        changed_options(&current, &different).get("limits"),
        Some(&json!({"cpu": 2, "mem": "1G"}))
    );
}

#[test]
fn typed_view_reads_the_declared_options() {
    let snapshot = snapshot(json!({
        "alice": "a",
        "bobob": "b",
        "message": "ready",
        "extra": 42,
    }));

    let config = CharmConfig::from_snapshot(&snapshot).unwrap();

    assert_eq!(config.alice, "a");
    assert_eq!(config.bobob, "b");
    assert_eq!(config.message, "ready");
}

#[test]
fn missing_option_is_an_error() {
    let snapshot = snapshot(json!({"alice": "a", "bobob": "b"}));

    let err = CharmConfig::from_snapshot(&snapshot).unwrap_err();

    assert!(matches!(err, ConfigError::MissingOption { option } if option == "message"));
}

#[test]
fn non_string_option_is_an_error() {
    let snapshot = snapshot(json!({"alice": "a", "bobob": 5, "message": "m"}));

    let err = CharmConfig::from_snapshot(&snapshot).unwrap_err();

    assert!(matches!(err, ConfigError::WrongType { ref option, .. } if option == "bobob"));
}

#[test]
fn the_default_snapshot_parses_into_the_typed_view() {
    let config = CharmConfig::from_snapshot(&CharmConfig::default_snapshot()).unwrap();

    assert_eq!(config.alice, "wonderland");
    assert_eq!(config.bobob, "builder");
    assert_eq!(config.message, "demo is running");
}
