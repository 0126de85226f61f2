//! Inspection handlers.

use axum::Json;
use axum::extract::State;

use afap_entity::inspection::{CreateInspection, Inspection};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/inspecciones
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateInspection>,
) -> Result<Json<Inspection>, ApiError> {
    Ok(Json(state.inspections.schedule(&auth, payload).await?))
}

/// GET /api/inspecciones
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Inspection>>, ApiError> {
    Ok(Json(state.inspections.list(&auth).await?))
}
