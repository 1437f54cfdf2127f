//! Error types for scheduler operations.

use thiserror::Error;

/// Errors that abort a scheduler call.
///
/// Per-task failures never show up here; they are captured as
/// [`TaskFailure`](crate::core::TaskFailure) values inside the run result.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Batch size or configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The execution substrate could not be created.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
