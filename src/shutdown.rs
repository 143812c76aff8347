//! Ctrl+C handling for the publish loop.

use tokio::sync::broadcast;
use tracing::{info, warn};

/// Spawn a task that broadcasts once when Ctrl+C is received.
///
/// If the signal handler cannot be installed the sender is kept alive so
/// the loop keeps running; it can then only stop via `--max-records`, an
/// escalated error, or an external kill.
pub fn shutdown_on_ctrl_c() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt signal (Ctrl+C)");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                warn!("Failed to install Ctrl+C signal handler: {e}");
                std::future::pending::<()>().await;
                drop(shutdown_tx);
            }
        }
    });

    shutdown_rx
}
