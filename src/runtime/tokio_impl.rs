//! Tokio runtime implementation.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration using tokio.
pub(super) async fn sleep_impl(duration: Duration) {
    tokio::time::sleep(duration).await
}

/// Spawn a detached task using tokio.
///
/// Dropping tokio's JoinHandle detaches the task.
pub(super) fn spawn_impl<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(tokio::spawn(future));
}
