//! Batch progress notifications.
//!
//! Provides a tracing-backed sink, a silent sink, and a bounded in-memory
//! sink for tests and dev.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

/// "Batch completed" event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    /// Identifier of the run that emitted the event.
    pub run_id: Uuid,
    /// Batches completed so far, including this one.
    pub completed: usize,
    /// Total batches in the run.
    pub total: usize,
    /// Number of tasks in the batch just completed.
    pub batch_len: usize,
    /// Successful tasks in this batch.
    pub succeeded: usize,
    /// Failed tasks in this batch.
    pub failed: usize,
    /// Wall time spent on this batch.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Whether this event reports the final batch of its run.
    pub const fn is_last(&self) -> bool {
        self.completed == self.total
    }
}

/// Progress sink abstraction.
///
/// Purely observational: the scheduler never reads anything back.
pub trait ProgressSink: Send + Sync {
    /// Record a completed batch.
    fn batch_completed(&self, progress: &BatchProgress);
}

/// Sink that logs each event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn batch_completed(&self, progress: &BatchProgress) {
        info!(
            run_id = %progress.run_id,
            completed = progress.completed,
            total = progress.total,
            succeeded = progress.succeeded,
            failed = progress.failed,
            elapsed_ms = u64::try_from(progress.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Batch {}/{} completed",
            progress.completed,
            progress.total
        );
    }
}

/// Sink that discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn batch_completed(&self, _progress: &BatchProgress) {}
}

/// In-memory sink with a bounded buffer.
///
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct InMemoryProgress {
    events: Arc<Mutex<VecDeque<BatchProgress>>>,
    max_events: usize,
}

impl InMemoryProgress {
    /// Create a new in-memory sink keeping at most `max_events` events.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<BatchProgress> {
        self.events.lock().iter().cloned().collect()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are stored.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all stored events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ProgressSink for InMemoryProgress {
    fn batch_completed(&self, progress: &BatchProgress) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(progress.clone());
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for Arc<S> {
    fn batch_completed(&self, progress: &BatchProgress) {
        (**self).batch_completed(progress);
    }
}
