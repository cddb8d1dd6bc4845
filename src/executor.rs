use tokio::runtime::Handle;

/// A task-running service of unspecified internal threading policy.
///
/// Callers may assume a submitted task executes at most once; ordering
/// across submissions is the executor's business, not the caller's.
pub trait TaskExecutor: Send + Sync + std::fmt::Debug {
    fn execute(&self, task: Box<dyn FnOnce() + Send>);
}

/// Runs every task inline on the submitting thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl TaskExecutor for DirectExecutor {
    fn execute(&self, task: Box<dyn FnOnce() + Send>) {
        task();
    }
}

/// Hands tasks to a tokio runtime for asynchronous execution.
#[derive(Debug, Clone)]
pub struct SpawnExecutor {
    tokio_handle: Handle,
}

impl SpawnExecutor {
    pub fn new(tokio_handle: Handle) -> Self {
        Self { tokio_handle }
    }

    /// Capture the runtime the caller is currently inside.
    ///
    /// Panics outside a tokio runtime, same as [`Handle::current`].
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl TaskExecutor for SpawnExecutor {
    fn execute(&self, task: Box<dyn FnOnce() + Send>) {
        self.tokio_handle.spawn(async move { task() });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn direct_executor_runs_inline() {
        let counter = Arc::new(AtomicUsize::new(0));
        let executor = DirectExecutor;

        let task_counter = Arc::clone(&counter);
        executor.execute(Box::new(move || {
            task_counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn spawn_executor_runs_task() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let executor = SpawnExecutor::current();

        executor.execute(Box::new(move || {
            let _ = tx.send(42u32);
        }));

        assert_eq!(rx.await.unwrap(), 42);
    }
}
