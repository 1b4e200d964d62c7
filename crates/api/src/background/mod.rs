//! Background tasks.
//!
//! [`spawn_background`] runs one-off work (e.g. sending email) on the shared
//! [`TaskTracker`] so graceful shutdown can wait for it. Long-running jobs
//! such as [`token_cleanup`] take a [`CancellationToken`](tokio_util::sync::CancellationToken).

use std::fmt::Display;
use std::future::Future;

use tokio_util::task::TaskTracker;

pub mod token_cleanup;

/// Spawn `task` on `tracker`, logging its error instead of propagating it.
///
/// A panic inside the task is contained by the tokio runtime and does not
/// affect the request that spawned it.
pub fn spawn_background<F, E>(tracker: &TaskTracker, name: &'static str, task: F)
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tracker.spawn(async move {
        if let Err(e) = task.await {
            tracing::error!(task = name, error = %e, "Background task failed");
        }
    });
}
