//! Public certificate verification.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use afap_entity::permit::PublicPermitView;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/verificar/{id}
///
/// Public endpoint reached from the certificate's QR code. No
/// authentication; returns the reduced projection or 404.
pub async fn verificar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicPermitView>, ApiError> {
    Ok(Json(state.certificates.verify_public(id).await?))
}
