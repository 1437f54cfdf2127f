//! Per-task outcomes and the ordered run result.

use std::fmt;
use std::ops::Index;

/// Why a task did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure<E> {
    /// The task returned its own error.
    Error(E),
    /// The task panicked while starting or running; holds the panic message.
    Panicked(String),
}

impl<E> TaskFailure<E> {
    /// The task's own error, if it returned one.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(err) => Some(err),
            Self::Panicked(_) => None,
        }
    }

    /// Whether the failure was a captured panic.
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }
}

impl<E: fmt::Display> fmt::Display for TaskFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "task failed: {err}"),
            Self::Panicked(msg) => write!(f, "task panicked: {msg}"),
        }
    }
}

impl<E> std::error::Error for TaskFailure<E> where E: fmt::Debug + fmt::Display {}

/// Result of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The task produced a value.
    Success(T),
    /// The task failed; siblings were not affected.
    Failure(TaskFailure<E>),
}

impl<T, E> Outcome<T, E> {
    /// Whether the task succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the task failed.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrow the success value.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the failure.
    pub const fn failure(&self) -> Option<&TaskFailure<E>> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, TaskFailure<E>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(TaskFailure::Error(err)),
        }
    }
}

/// Outcomes of a run, index-aligned with the submitted tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult<T, E> {
    outcomes: Vec<Outcome<T, E>>,
}

impl<T, E> RunResult<T, E> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn extend(&mut self, batch: impl IntoIterator<Item = Outcome<T, E>>) {
        self.outcomes.extend(batch);
    }

    /// Number of outcomes (equal to the number of submitted tasks).
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no tasks were submitted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome of the task submitted at `index`.
    pub fn get(&self, index: usize) -> Option<&Outcome<T, E>> {
        self.outcomes.get(index)
    }

    /// Iterate outcomes in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<T, E>> {
        self.outcomes.iter()
    }

    /// Count of successful tasks.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Count of failed tasks.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Indices of failed tasks, ascending.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.is_failure().then_some(i))
            .collect()
    }

    /// Borrow all outcomes as a slice.
    pub fn as_slice(&self) -> &[Outcome<T, E>] {
        &self.outcomes
    }

    /// Take the outcomes.
    pub fn into_vec(self) -> Vec<Outcome<T, E>> {
        self.outcomes
    }

    /// Take the outcomes as standard results.
    pub fn into_results(self) -> Vec<Result<T, TaskFailure<E>>> {
        self.outcomes.into_iter().map(Outcome::into_result).collect()
    }
}

impl<T, E> Index<usize> for RunResult<T, E> {
    type Output = Outcome<T, E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.outcomes[index]
    }
}

impl<T, E> IntoIterator for RunResult<T, E> {
    type Item = Outcome<T, E>;
    type IntoIter = std::vec::IntoIter<Outcome<T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, T, E> IntoIterator for &'a RunResult<T, E> {
    type Item = &'a Outcome<T, E>;
    type IntoIter = std::slice::Iter<'a, Outcome<T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
