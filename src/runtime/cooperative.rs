//! Single-thread tokio runtime for blocking callers.

use tokio::runtime::{Builder, Runtime};

use crate::core::{BatchScheduler, RunResult, SchedulerError, Task};

/// Current-thread tokio runtime that drives batch runs from synchronous code.
///
/// All tasks of a run are multiplexed on the calling thread. The timer driver
/// is enabled so tasks can use tokio sleeps and timeouts. The I/O driver is
/// only present when tokio's `net` feature is enabled by the application.
pub struct CooperativeRuntime {
    runtime: Runtime,
}

impl CooperativeRuntime {
    /// Create a new current-thread runtime.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Runtime` if the runtime cannot be built.
    pub fn new() -> Result<Self, SchedulerError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime })
    }

    /// Run `tasks` on this runtime, blocking until every batch has completed.
    ///
    /// Must not be called from inside another async runtime.
    ///
    /// # Errors
    ///
    /// Same as [`BatchScheduler::run`].
    pub fn run_blocking<T, E>(
        &self,
        scheduler: &BatchScheduler,
        tasks: Vec<Task<T, E>>,
        batch_size: Option<i64>,
    ) -> Result<RunResult<T, E>, SchedulerError>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        self.runtime.block_on(scheduler.run(tasks, batch_size))
    }

    /// Handle to the underlying runtime, for building tasks that need one.
    pub fn handle(&self) -> &tokio::runtime::Handle {
        self.runtime.handle()
    }
}

/// Build a throwaway runtime and run `tasks` on it.
///
/// # Errors
///
/// Returns `SchedulerError::Runtime` if the runtime cannot be built, or the
/// errors of [`BatchScheduler::run`].
pub fn run_blocking<T, E>(
    scheduler: &BatchScheduler,
    tasks: Vec<Task<T, E>>,
    batch_size: Option<i64>,
) -> Result<RunResult<T, E>, SchedulerError>
where
    T: Send + 'static,
    E: Send + 'static,
{
    CooperativeRuntime::new()?.run_blocking(scheduler, tasks, batch_size)
}
