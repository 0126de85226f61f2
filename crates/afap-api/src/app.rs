//! Server entry: bind, serve, shut down gracefully.

use tracing::info;

use afap_core::error::AppError;
use afap_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(state: AppState) -> AppResult<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "HTTP server listening");

    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
