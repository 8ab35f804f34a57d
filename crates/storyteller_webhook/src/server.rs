//! Serving the webhook router.

use axum::Router;
use std::net::SocketAddr;
use storyteller_error::HttpError;
use tracing::{error, info, instrument};

/// Bind `addr` and serve `router` until Ctrl-C.
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails.
#[instrument(skip(router))]
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), HttpError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", addr, e)))?;
    info!(addr = %addr, "Webhook listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;

    info!("Webhook stopped");
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping gracefully"),
        Err(e) => {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
