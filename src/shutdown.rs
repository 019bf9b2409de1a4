// src/shutdown.rs

//! Ctrl-C listening for the binary.

use std::future::{pending, Future};
use std::io;

use tracing::warn;

/// Resolve when the user presses Ctrl-C.
///
/// If the handler cannot be installed this never resolves, so a running
/// child keeps going instead of being torn down as cancelled.
pub async fn ctrl_c() {
    interrupted(tokio::signal::ctrl_c()).await
}

/// Resolve once `listener` reports a delivered signal. A listener error is
/// logged and the future stays pending.
pub async fn interrupted<F>(listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = listener.await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        pending::<()>().await;
    }
}
