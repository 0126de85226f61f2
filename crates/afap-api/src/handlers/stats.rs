//! Reviewer dashboard handler.

use axum::Json;
use axum::extract::State;

use afap_service::stats::DashboardStats;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/stats/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.stats.dashboard(&auth).await?))
}
