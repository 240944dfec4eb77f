//! OS signal handling.

use crate::lifecycle::shutdown::Shutdown;

/// Trigger `shutdown` on Ctrl+C.
///
/// If the handler cannot be installed the error is logged and the
/// shutdown is never triggered from here.
pub async fn trigger_on_ctrl_c(shutdown: &Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
