//! Concurrency capacity probes.
//!
//! The scheduler asks a [`CapacityProbe`] for a hint only when a run is
//! started without an explicit batch size. Probes are injected, so tests can
//! supply deterministic values.

use tracing::debug;

/// Source of the concurrency capacity hint.
///
/// The hint is signed; zero or negative values signal a degenerate
/// environment and make the scheduler fall back to a batch size of one.
pub trait CapacityProbe: Send + Sync {
    /// Current concurrency capacity.
    fn capacity_hint(&self) -> i64;
}

impl<F> CapacityProbe for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn capacity_hint(&self) -> i64 {
        self()
    }
}

/// Number of OS threads in the current process.
///
/// On Linux this counts `/proc/self/task`. Elsewhere, or when procfs cannot
/// be read, it reports the available parallelism instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessThreads;

impl CapacityProbe for ProcessThreads {
    fn capacity_hint(&self) -> i64 {
        match process_thread_count() {
            Some(count) => count,
            None => {
                debug!("process thread count unavailable, using available parallelism");
                AvailableParallelism.capacity_hint()
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn process_thread_count() -> Option<i64> {
    let entries = std::fs::read_dir("/proc/self/task").ok()?;
    i64::try_from(entries.count()).ok()
}

#[cfg(not(target_os = "linux"))]
fn process_thread_count() -> Option<i64> {
    None
}

/// Number of logical CPUs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableParallelism;

impl CapacityProbe for AvailableParallelism {
    fn capacity_hint(&self) -> i64 {
        i64::try_from(num_cpus::get()).unwrap_or(i64::MAX)
    }
}

/// Constant capacity hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCapacity(pub i64);

impl CapacityProbe for FixedCapacity {
    fn capacity_hint(&self) -> i64 {
        self.0
    }
}
