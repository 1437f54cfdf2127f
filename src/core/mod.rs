//! Core scheduling abstractions: tasks, outcomes, collaborators, and the scheduler.

pub mod capacity;
pub mod error;
pub mod outcome;
pub mod partition;
pub mod progress;
pub mod scheduler;
pub mod task;

pub use capacity::{AvailableParallelism, CapacityProbe, FixedCapacity, ProcessThreads};
pub use error::{AppResult, SchedulerError};
pub use outcome::{Outcome, RunResult, TaskFailure};
pub use partition::{batch_count, partition};
pub use progress::{BatchProgress, InMemoryProgress, ProgressSink, SilentProgress, TracingProgress};
pub use scheduler::BatchScheduler;
pub use task::{AnyTask, Operation, Task};
