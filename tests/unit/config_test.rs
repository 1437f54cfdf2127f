//! Tests for configuration validation and parsing

use std::collections::HashMap;

use prometheus_batch_scheduler::config::{CapacitySource, ProgressMode, SchedulerConfig};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let cfg = SchedulerConfig::default();
    assert_eq!(cfg.batch_size, None);
    assert_eq!(cfg.max_auto_batch_size, None);
    assert_eq!(cfg.capacity, CapacitySource::ProcessThreads);
    assert_eq!(cfg.progress, ProgressMode::Tracing);
    assert!(cfg.catch_panics);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_invalid_batch_size() {
    let zero = SchedulerConfig {
        batch_size: Some(0),
        ..SchedulerConfig::default()
    };
    assert!(zero.validate().is_err());

    let negative = SchedulerConfig {
        batch_size: Some(-4),
        ..SchedulerConfig::default()
    };
    assert!(negative.validate().is_err());
}

#[test]
fn test_config_invalid_max_auto_batch_size() {
    let cfg = SchedulerConfig {
        max_auto_batch_size: Some(0),
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_degenerate_fixed_capacity_is_valid() {
    let cfg = SchedulerConfig {
        capacity: CapacitySource::Fixed(0),
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "batch_size": 16,
        "max_auto_batch_size": 64,
        "capacity": { "fixed": 8 },
        "progress": "silent",
        "catch_panics": false
    }"#;

    let cfg = SchedulerConfig::from_json_str(json).expect("valid config");
    assert_eq!(cfg.batch_size, Some(16));
    assert_eq!(cfg.max_auto_batch_size, Some(64));
    assert_eq!(cfg.capacity, CapacitySource::Fixed(8));
    assert_eq!(cfg.progress, ProgressMode::Silent);
    assert!(!cfg.catch_panics);
}

#[test]
fn test_config_from_empty_json_uses_defaults() {
    let cfg = SchedulerConfig::from_json_str("{}").expect("valid config");
    assert_eq!(cfg, SchedulerConfig::default());
}

#[test]
fn test_config_from_json_rejects_invalid_values() {
    assert!(SchedulerConfig::from_json_str(r#"{ "batch_size": -1 }"#).is_err());
    assert!(SchedulerConfig::from_json_str(r#"{ "capacity": "quantum" }"#).is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_lookup() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[
        ("BATCH_SCHEDULER_BATCH_SIZE", "12"),
        ("BATCH_SCHEDULER_MAX_AUTO_BATCH_SIZE", "32"),
        ("BATCH_SCHEDULER_CAPACITY", "available_parallelism"),
        ("BATCH_SCHEDULER_PROGRESS", "silent"),
        ("BATCH_SCHEDULER_CATCH_PANICS", "false"),
    ]))
    .expect("valid env config");

    assert_eq!(cfg.batch_size, Some(12));
    assert_eq!(cfg.max_auto_batch_size, Some(32));
    assert_eq!(cfg.capacity, CapacitySource::AvailableParallelism);
    assert_eq!(cfg.progress, ProgressMode::Silent);
    assert!(!cfg.catch_panics);
}

#[test]
fn test_config_from_lookup_fixed_capacity() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[("BATCH_SCHEDULER_CAPACITY", "3")]))
        .expect("valid env config");
    assert_eq!(cfg.capacity, CapacitySource::Fixed(3));
}

#[test]
fn test_config_from_lookup_empty_is_default() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[])).expect("valid env config");
    assert_eq!(cfg, SchedulerConfig::default());
}

#[test]
fn test_config_from_lookup_errors_name_variable() {
    let err = SchedulerConfig::from_lookup(lookup(&[("BATCH_SCHEDULER_BATCH_SIZE", "many")]))
        .unwrap_err();
    assert!(err.contains("BATCH_SCHEDULER_BATCH_SIZE"));

    let err = SchedulerConfig::from_lookup(lookup(&[("BATCH_SCHEDULER_PROGRESS", "bar")]))
        .unwrap_err();
    assert!(err.contains("unknown progress mode"));

    let err = SchedulerConfig::from_lookup(lookup(&[("BATCH_SCHEDULER_BATCH_SIZE", "0")]))
        .unwrap_err();
    assert!(err.contains("greater than 0"));
}

#[test]
fn test_config_from_env_file_rejects_malformed_file() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join(".env");
    std::fs::write(&path, "this line is broken\n").expect("write .env");

    let err = SchedulerConfig::from_env_file(&path).unwrap_err();
    assert!(err.contains(".env"), "unexpected error: {err}");
    assert!(err.starts_with("BATCH_SCHEDULER_"));
}

#[test]
fn test_config_from_env_file_missing_file_is_skipped() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.env");

    assert!(SchedulerConfig::from_env_file(&path).is_ok());
}
