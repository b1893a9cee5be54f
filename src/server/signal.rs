// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown (orchestrator stop)
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;

use tokio::sync::Notify;

/// Start signal handlers (Unix)
///
/// Spawns a background task that waits for a termination signal and
/// notifies the serve loop.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                crate::logger::log_info("SIGTERM received, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                crate::logger::log_info("SIGINT received, initiating graceful shutdown");
            }
        }
        // notify_one stores a permit, so the signal is not lost if the
        // serve loop is between polls of its Notified future
        shutdown.notify_one();
    });
}

/// Fallback for non-Unix platforms - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_info("Ctrl+C received, initiating graceful shutdown");
            shutdown.notify_one();
        }
    });
}
