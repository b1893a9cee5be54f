// Server module entry point
// Listener creation, the serve loop, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

// Re-export common entry points
pub use listener::create_reusable_listener;
pub use signal::start_signal_handler;

/// How long to wait for in-flight connections on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Run the accept loop until a shutdown signal arrives
///
/// On shutdown the listener stops accepting and in-flight connections are
/// drained for up to `SHUTDOWN_GRACE` before the loop returns.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn_counter = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &conn_counter);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown(conn_counter.load(Ordering::SeqCst));
                break;
            }
        }
    }

    // Stop accepting, then drain in-flight connections
    drop(listener);
    drain_connections(&conn_counter).await;
    logger::log_info("Shutdown complete");
    Ok(())
}

/// Wait for active connections to finish, bounded by the grace period
async fn drain_connections(conn_counter: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    while conn_counter.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {} connections still active",
                conn_counter.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
