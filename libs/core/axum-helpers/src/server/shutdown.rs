//! Graceful shutdown coordination.

use tokio::sync::watch;
use tracing::info;

/// Broadcasts a shutdown signal to interested tasks.
///
/// The server triggers the coordinator once an OS signal arrives, and
/// cleanup tasks wait on [`ShutdownCoordinator::wait_for_signal`]. A watch
/// channel is used so tasks that start waiting after the trigger still
/// observe it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, receiver)
    }

    /// Notify all subscribers that shutdown has started.
    pub fn trigger(&self) {
        // Errors only mean there are no subscribers left
        let _ = self.sender.send(true);
    }

    /// Wait until shutdown is triggered.
    pub async fn wait_for_signal(&self) {
        let mut receiver = self.sender.subscribe();
        while !*receiver.borrow_and_update() {
            if receiver.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Completes when the process receives SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| tracing::error!("Failed to install Ctrl+C handler: {:?}", e));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {:?}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Waits for an OS shutdown signal, then triggers the coordinator so
/// cleanup tasks start while the server drains connections.
pub async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    shutdown_signal().await;
    coordinator.trigger();
}
