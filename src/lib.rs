//! # Prometheus Batch Scheduler
//!
//! An adaptive batch scheduler for concurrent I/O-bound work.
//!
//! Given an ordered list of deferred operations, the scheduler splits it into
//! consecutive batches, runs each batch's operations concurrently on a single
//! cooperative task, and returns one outcome per operation in the original
//! order. A failing operation never aborts its siblings or later batches.
//!
//! ## Core Problem Solved
//!
//! Fan-out over many I/O-bound calls (HTTP fetches, model endpoints, storage
//! reads) needs a bound on how much is in flight at once:
//!
//! - **Bounded fan-out**: At most one batch of operations is in flight
//! - **Adaptive sizing**: Without an explicit size, batches follow the host's capacity hint
//! - **Failure isolation**: Errors and panics are captured per operation
//! - **Stable ordering**: Results are index-aligned with the input, whatever the completion order
//!
//! ## Key Features
//!
//! - **Injected collaborators**: Capacity probes and progress sinks are traits
//! - **Cooperative execution**: No threads are spawned; batches are joined on the caller's task
//! - **Configuration**: JSON or `BATCH_SCHEDULER_*` environment variables
//! - **Blocking entry point**: A current-thread tokio runtime for synchronous callers
//!
//! ## BatchScheduler
//!
//! ```rust,ignore
//! use prometheus_batch_scheduler::core::{BatchScheduler, ProcessThreads, Task};
//!
//! let scheduler = BatchScheduler::new(ProcessThreads);
//! let tasks: Vec<Task<String, reqwest::Error>> = urls
//!     .into_iter()
//!     .map(|url| Task::new(move || async move { reqwest::get(url).await?.text().await }))
//!     .collect();
//!
//! // Batch size from the process thread count
//! let result = scheduler.run(tasks, None).await?;
//! for outcome in &result {
//!     println!("{}", outcome.is_success());
//! }
//! ```
//!
//! ## From configuration
//!
//! ```rust,ignore
//! use prometheus_batch_scheduler::builders::build_scheduler;
//! use prometheus_batch_scheduler::config::SchedulerConfig;
//!
//! let cfg = SchedulerConfig::from_env()?;
//! let scheduler = build_scheduler(&cfg)?;
//! let result = scheduler.run_default(tasks).await?;
//! ```
//!
//! For complete examples, see:
//! - `tests/batch_scheduler_test.rs` - Full integration tests

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: tasks, outcomes, collaborators, and the scheduler.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct a scheduler from configuration.
pub mod builders;
/// Runtime adapters for blocking callers.
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::core::{BatchScheduler, Outcome, RunResult, SchedulerError, Task, TaskFailure};
