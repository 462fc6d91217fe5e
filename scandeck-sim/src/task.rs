//! Scoped ownership of timer tasks

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

/// Owns a spawned timer task and aborts it when dropped.
///
/// Aborting only takes effect at the task's next await point, so a tick that
/// is already running always finishes.
#[derive(Debug)]
pub struct TaskGuard {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl TaskGuard {
    /// Spawn `future` on the current tokio runtime
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(task = name, "timer task spawned");
        Self {
            name,
            handle: Some(tokio::spawn(future)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task ended on its own or was cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel the task; no further timer firings happen after this returns
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!(task = self.name, "timer task cancelled");
            }
            handle.abort();
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}
