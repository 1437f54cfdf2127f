//! Adaptive batch scheduler.
//!
//! Runs a list of deferred tasks in consecutive, size-bounded batches. Tasks
//! inside a batch are polled concurrently on the caller's task; batches run
//! strictly one after another. Every task yields exactly one [`Outcome`] at
//! its original index, and a failing task never disturbs its siblings.
//!
//! # Example
//!
//! ```rust,ignore
//! use prometheus_batch_scheduler::core::{BatchScheduler, FixedCapacity, Task};
//!
//! let scheduler = BatchScheduler::new(FixedCapacity(8));
//! let tasks: Vec<Task<usize, std::io::Error>> =
//!     (0..20).map(|i| Task::new(move || async move { Ok(i * 2) })).collect();
//!
//! // Explicit batch size
//! let result = scheduler.run(tasks, Some(5)).await?;
//! assert_eq!(result.len(), 20);
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use super::capacity::{CapacityProbe, ProcessThreads};
use super::error::SchedulerError;
use super::outcome::{Outcome, RunResult, TaskFailure};
use super::partition::{batch_count, partition};
use super::progress::{BatchProgress, ProgressSink, TracingProgress};
use super::task::Task;

/// Batch scheduler with injected capacity and progress collaborators.
///
/// The scheduler holds no per-run state, so one instance can serve any
/// number of sequential or concurrent runs.
pub struct BatchScheduler {
    capacity: Arc<dyn CapacityProbe>,
    progress: Arc<dyn ProgressSink>,
    default_batch_size: Option<i64>,
    max_auto_batch_size: Option<usize>,
    catch_panics: bool,
}

impl BatchScheduler {
    /// Create a scheduler that sizes batches from `capacity` when no batch
    /// size is given. Progress is logged through `tracing`.
    pub fn new(capacity: impl CapacityProbe + 'static) -> Self {
        Self {
            capacity: Arc::new(capacity),
            progress: Arc::new(TracingProgress),
            default_batch_size: None,
            max_auto_batch_size: None,
            catch_panics: true,
        }
    }

    /// Replace the progress sink.
    #[must_use]
    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    /// Batch size used by [`run_default`](Self::run_default).
    ///
    /// The value is checked when a run starts, like an explicit size.
    #[must_use]
    pub fn with_default_batch_size(mut self, batch_size: Option<i64>) -> Self {
        self.default_batch_size = batch_size;
        self
    }

    /// Upper bound for batch sizes taken from the capacity hint.
    ///
    /// Explicit sizes are never clamped. Zero is treated as one.
    #[must_use]
    pub fn with_max_auto_batch_size(mut self, max: usize) -> Self {
        self.max_auto_batch_size = Some(max.max(1));
        self
    }

    /// Whether task panics are captured as [`TaskFailure::Panicked`].
    ///
    /// Enabled by default. When disabled, a panicking task unwinds through
    /// the run.
    #[must_use]
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Configured default batch size.
    pub const fn default_batch_size(&self) -> Option<i64> {
        self.default_batch_size
    }

    /// Configured clamp for auto-resolved batch sizes.
    pub const fn max_auto_batch_size(&self) -> Option<usize> {
        self.max_auto_batch_size
    }

    /// Whether task panics are captured.
    pub const fn catches_panics(&self) -> bool {
        self.catch_panics
    }

    /// Resolve the effective batch size.
    ///
    /// An explicit size must be positive. Without one, the capacity probe is
    /// queried once; a non-positive hint resolves to one.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfiguration` if `batch_size` is
    /// zero or negative.
    pub fn resolve_batch_size(&self, batch_size: Option<i64>) -> Result<usize, SchedulerError> {
        match batch_size {
            Some(size) if size <= 0 => {
                warn!(batch_size = size, "Rejecting non-positive batch size");
                Err(SchedulerError::InvalidConfiguration(format!(
                    "batch_size must be greater than 0, got {size}"
                )))
            }
            Some(size) => Ok(usize::try_from(size).unwrap_or(usize::MAX)),
            None => {
                let hint = self.capacity.capacity_hint();
                let size = if hint <= 0 {
                    warn!(hint, "Capacity hint is not positive, falling back to batch size 1");
                    1
                } else {
                    usize::try_from(hint).unwrap_or(usize::MAX)
                };
                let size = self.max_auto_batch_size.map_or(size, |max| size.min(max));
                debug!(hint, batch_size = size, "Resolved batch size from capacity hint");
                Ok(size)
            }
        }
    }

    /// Run `tasks` in batches and return their outcomes in submission order.
    ///
    /// Batches run one after another; tasks within a batch are started in
    /// listed order and polled concurrently. A progress event is emitted
    /// after every batch.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfiguration` if `batch_size` is
    /// zero or negative. No task is started in that case. Task failures are
    /// never returned here; they are recorded in the [`RunResult`].
    pub async fn run<T, E>(
        &self,
        tasks: Vec<Task<T, E>>,
        batch_size: Option<i64>,
    ) -> Result<RunResult<T, E>, SchedulerError>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let batch_size = self.resolve_batch_size(batch_size)?;
        let total_tasks = tasks.len();
        let total_batches = batch_count(total_tasks, batch_size);
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "batch_run",
            %run_id,
            tasks = total_tasks,
            batch_size,
            batches = total_batches
        );

        async move {
            let mut results = RunResult::with_capacity(total_tasks);
            let mut first_index = 0;

            for (index, batch) in partition(tasks, batch_size).into_iter().enumerate() {
                let started = Instant::now();
                let batch_len = batch.len();
                debug!(batch = index + 1, tasks = batch_len, "Starting batch");

                let outcomes = self.execute_batch(batch, first_index).await;
                let failed = outcomes.iter().filter(|o| o.is_failure()).count();
                results.extend(outcomes);
                first_index += batch_len;

                let progress = BatchProgress {
                    run_id,
                    completed: index + 1,
                    total: total_batches,
                    batch_len,
                    succeeded: batch_len - failed,
                    failed,
                    elapsed: started.elapsed(),
                };
                debug!(
                    batch = progress.completed,
                    succeeded = progress.succeeded,
                    failed = progress.failed,
                    "Batch finished"
                );
                self.progress.batch_completed(&progress);
            }

            Ok(results)
        }
        .instrument(span)
        .await
    }

    /// Run `tasks` with the configured default batch size.
    ///
    /// Without a configured default this is `run(tasks, None)`.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_default<T, E>(
        &self,
        tasks: Vec<Task<T, E>>,
    ) -> Result<RunResult<T, E>, SchedulerError>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        self.run(tasks, self.default_batch_size).await
    }

    /// Start every task of a batch in order and wait for all of them.
    async fn execute_batch<T, E>(
        &self,
        batch: Vec<Task<T, E>>,
        first_index: usize,
    ) -> Vec<Outcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let labels: Vec<Option<String>> = batch
            .iter()
            .map(|task| task.label().map(str::to_owned))
            .collect();
        let in_flight: Vec<_> = batch.into_iter().map(|task| self.launch(task)).collect();
        let outcomes = future::join_all(in_flight).await;

        for (offset, outcome) in outcomes.iter().enumerate() {
            if let Outcome::Failure(failure) = outcome {
                debug!(
                    task = first_index + offset,
                    label = labels[offset].as_deref().unwrap_or("-"),
                    panicked = failure.is_panic(),
                    "Task failed"
                );
            }
        }
        outcomes
    }

    fn launch<T, E>(&self, task: Task<T, E>) -> BoxFuture<'static, Outcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        if !self.catch_panics {
            return task.start().map(Outcome::from).boxed();
        }

        match std::panic::catch_unwind(AssertUnwindSafe(move || task.start())) {
            Ok(fut) => AssertUnwindSafe(fut)
                .catch_unwind()
                .map(|caught| match caught {
                    Ok(result) => Outcome::from(result),
                    Err(payload) => panicked(&*payload),
                })
                .boxed(),
            Err(payload) => future::ready(panicked(&*payload)).boxed(),
        }
    }
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(ProcessThreads)
    }
}

fn panicked<T, E>(payload: &(dyn Any + Send)) -> Outcome<T, E> {
    Outcome::Failure(TaskFailure::Panicked(panic_message(payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
