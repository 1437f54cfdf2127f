//! Tests for outcomes and run results

use prometheus_batch_scheduler::core::{Outcome, TaskFailure};

#[test]
fn test_outcome_into_result() {
    let ok: Outcome<u32, String> = Outcome::Success(5);
    assert_eq!(ok.into_result(), Ok(5));

    let failed: Outcome<u32, String> = Outcome::Failure(TaskFailure::Error("refused".into()));
    assert_eq!(
        failed.into_result(),
        Err(TaskFailure::Error("refused".to_string()))
    );
}

#[test]
fn test_task_failure_accessors() {
    let err: TaskFailure<&str> = TaskFailure::Error("dns");
    assert_eq!(err.error(), Some(&"dns"));
    assert!(!err.is_panic());

    let panic: TaskFailure<&str> = TaskFailure::Panicked("boom".into());
    assert_eq!(panic.error(), None);
    assert!(panic.is_panic());
}

#[test]
fn test_task_failure_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let failure: TaskFailure<std::io::Error> =
        TaskFailure::Error(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"));
    assert_error(&failure);
    assert_eq!(failure.to_string(), "task failed: slow");
}
