//! Administrator-only audit handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/descargas
pub async fn descargas(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = state
        .certificates
        .all_downloads(&auth, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({
        "total": page.total_items,
        "page": page.page,
        "descargas": page.items,
    })))
}
