//! Configuration models for the scheduler and its collaborators.

pub mod scheduler;

pub use scheduler::{CapacitySource, ProgressMode, SchedulerConfig, ENV_PREFIX};
