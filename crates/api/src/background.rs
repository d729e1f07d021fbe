//! Fire-and-forget work spawned from request handlers.
//!
//! A failing or panicking task is logged and never takes the process down.
//! On shutdown the tracker is closed and in-flight tasks are awaited, up to
//! a deadline.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::task::TaskTracker;

#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on the runtime, outside the request that spawned it.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.tracker.spawn(async move {
            match AssertUnwindSafe(task).catch_unwind().await {
                Ok(Ok(())) => tracing::debug!(task = name, "Background task finished"),
                Ok(Err(e)) => tracing::error!(task = name, error = %e, "Background task failed"),
                Err(payload) => tracing::error!(
                    task = name,
                    panic = %panic_message(payload.as_ref()),
                    "Background task panicked"
                ),
            }
        });
    }

    /// Number of tasks still running.
    pub fn len(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Stop accepting new tasks and wait for running ones.
    ///
    /// Returns `false` if `timeout` elapsed first; the remaining tasks are
    /// left to be dropped with the runtime.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        self.tracker.close();
        tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok()
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
