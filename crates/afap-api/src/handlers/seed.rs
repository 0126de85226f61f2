//! Demo seeding handler.

use axum::Json;
use axum::extract::State;

use afap_service::seed::SeedOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/seed
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedOutcome>, ApiError> {
    Ok(Json(state.seeder.seed().await?))
}
