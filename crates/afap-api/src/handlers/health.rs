//! Health and service-info handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "AFAP Habilitaciones API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// GET /health and GET /api/health
pub async fn health(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "healthy".into(),
            database: "healthy".into(),
            timestamp: Utc::now(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".into(),
                    database: "unhealthy".into(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response()
        }
    }
}
