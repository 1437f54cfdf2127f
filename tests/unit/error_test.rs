//! Tests for error types

use prometheus_batch_scheduler::core::SchedulerError;

#[test]
fn test_invalid_configuration_error() {
    let err = SchedulerError::InvalidConfiguration(
        "batch_size must be greater than 0, got 0".to_string(),
    );
    assert_eq!(
        format!("{}", err),
        "invalid configuration: batch_size must be greater than 0, got 0"
    );
}

#[test]
fn test_runtime_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "no reactor");
    let err: SchedulerError = io.into();
    assert!(matches!(err, SchedulerError::Runtime(_)));
    assert_eq!(format!("{}", err), "runtime error: no reactor");
}

#[test]
fn test_scheduler_error_into_anyhow() {
    let err = SchedulerError::InvalidConfiguration("bad".to_string());
    let app: prometheus_batch_scheduler::core::AppResult<()> = Err(err.into());
    assert!(app.unwrap_err().to_string().contains("bad"));
}
