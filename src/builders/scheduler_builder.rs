//! Builders to construct a batch scheduler from configuration.

use tracing::warn;

use crate::config::{CapacitySource, ProgressMode, SchedulerConfig};
use crate::core::{
    AvailableParallelism, BatchScheduler, CapacityProbe, FixedCapacity, ProcessThreads,
    ProgressSink, SchedulerError, SilentProgress, TracingProgress,
};

/// Build a scheduler whose collaborators are selected by `cfg`.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfiguration` if `cfg` fails validation.
pub fn build_scheduler(cfg: &SchedulerConfig) -> Result<BatchScheduler, SchedulerError> {
    let scheduler = match cfg.capacity {
        CapacitySource::ProcessThreads => {
            build_scheduler_with(cfg, ProcessThreads, SilentProgress)?
        }
        CapacitySource::AvailableParallelism => {
            build_scheduler_with(cfg, AvailableParallelism, SilentProgress)?
        }
        CapacitySource::Fixed(hint) => {
            build_scheduler_with(cfg, FixedCapacity(hint), SilentProgress)?
        }
    };

    Ok(match cfg.progress {
        ProgressMode::Tracing => scheduler.with_progress(TracingProgress),
        ProgressMode::Silent => scheduler,
    })
}

/// Build a scheduler from `cfg` using caller-provided collaborators.
///
/// `capacity` and `progress` take precedence over the `capacity` and
/// `progress` selections in `cfg`; the remaining settings are applied.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfiguration` if `cfg` fails validation.
pub fn build_scheduler_with<C, P>(
    cfg: &SchedulerConfig,
    capacity: C,
    progress: P,
) -> Result<BatchScheduler, SchedulerError>
where
    C: CapacityProbe + 'static,
    P: ProgressSink + 'static,
{
    cfg.validate().map_err(|e| {
        warn!(error = %e, "Rejecting scheduler configuration");
        SchedulerError::InvalidConfiguration(e)
    })?;

    let mut scheduler = BatchScheduler::new(capacity)
        .with_progress(progress)
        .with_default_batch_size(cfg.batch_size)
        .with_catch_panics(cfg.catch_panics);

    if let Some(max) = cfg.max_auto_batch_size {
        let max = usize::try_from(max).unwrap_or(usize::MAX);
        scheduler = scheduler.with_max_auto_batch_size(max);
    }

    Ok(scheduler)
}
