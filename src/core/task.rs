//! Deferred units of work and the operation abstraction.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

type Thunk<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

/// A deferred, argument-less unit of work.
///
/// Nothing runs when a `Task` is built. The scheduler invokes the wrapped
/// closure exactly once, when the task's batch is started, and polls the
/// returned future to completion.
///
/// # Example
///
/// ```rust,ignore
/// use prometheus_batch_scheduler::core::Task;
///
/// let task: Task<u64, std::io::Error> = Task::new(|| async {
///     tokio::time::sleep(std::time::Duration::from_millis(5)).await;
///     Ok(42)
/// })
/// .with_label("answer");
/// ```
pub struct Task<T, E> {
    label: Option<String>,
    thunk: Thunk<T, E>,
}

/// Task whose error is an `anyhow::Error`, for heterogeneous fallible work.
pub type AnyTask<T> = Task<T, anyhow::Error>;

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a closure producing a future. The closure is not called here.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            label: None,
            thunk: Box::new(move || f().boxed()),
        }
    }

    /// Wrap a caller-defined [`Operation`].
    pub fn from_operation<O>(operation: O) -> Self
    where
        O: Operation<T, E> + 'static,
    {
        Self {
            label: None,
            thunk: Box::new(move || operation.execute()),
        }
    }

    /// Attach a label used in log output.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl<T, E> Task<T, E> {
    /// Optional label of this task.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Invoke the deferred closure, consuming the task.
    pub(crate) fn start(self) -> BoxFuture<'static, Result<T, E>> {
        (self.thunk)()
    }
}

impl<T, E> fmt::Debug for Task<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Abstraction for caller types that represent a deferred operation.
///
/// Implementors are consumed on execution, so an operation runs at most once.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use prometheus_batch_scheduler::core::{Operation, Task};
///
/// struct FetchPage {
///     url: String,
/// }
///
/// #[async_trait]
/// impl Operation<String, std::io::Error> for FetchPage {
///     async fn execute(self) -> Result<String, std::io::Error> {
///         Ok(format!("contents of {}", self.url))
///     }
/// }
///
/// let task = Task::from_operation(FetchPage { url: "https://example.com".into() });
/// ```
#[async_trait]
pub trait Operation<T, E>: Send
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Perform the operation.
    async fn execute(self) -> Result<T, E>;
}
