//! smol runtime implementation.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration using smol.
pub(super) async fn sleep_impl(duration: Duration) {
    smol::Timer::after(duration).await;
}

/// Spawn a detached task using smol.
///
/// smol cancels a Task when it is dropped, so it has to be detached.
pub(super) fn spawn_impl<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    smol::spawn(future).detach();
}
