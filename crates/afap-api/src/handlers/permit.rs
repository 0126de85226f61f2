//! AFAP permit handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use uuid::Uuid;
use validator::ValidateEmail;

use afap_core::error::AppError;
use afap_entity::download_log::DownloadLog;
use afap_entity::permit::{CreatePermit, Permit};

use crate::dto::request::UpdateEstadoRequest;
use crate::dto::response::EstadoResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/afap
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePermit>,
) -> Result<Json<Permit>, ApiError> {
    if !payload.solicitante_email.validate_email() {
        return Err(ApiError(AppError::validation("Email del solicitante inválido")));
    }
    if payload.metros_cuadrados <= 0.0 {
        return Err(ApiError(AppError::validation(
            "La superficie debe ser mayor a cero",
        )));
    }

    let permit = state.permits.create(&auth, payload).await?;
    Ok(Json(permit))
}

/// GET /api/afap
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Permit>>, ApiError> {
    Ok(Json(state.permits.list(&auth).await?))
}

/// GET /api/afap/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Permit>, ApiError> {
    Ok(Json(state.permits.get(&auth, id).await?))
}

/// PATCH /api/afap/{id}/estado
pub async fn update_estado(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEstadoRequest>,
) -> Result<Json<EstadoResponse>, ApiError> {
    let change = state
        .permits
        .update_status(
            &auth,
            id,
            afap_entity::permit::UpdateStatus {
                estado: req.estado,
                observaciones: req.observaciones,
                version: req.version,
            },
        )
        .await?;

    Ok(Json(EstadoResponse {
        message: "Estado actualizado correctamente".to_string(),
        old_estado: change.old_estado,
        new_estado: change.new_estado,
        version: change.permit.version,
    }))
}

/// GET /api/afap/{id}/certificado
pub async fn certificado(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (permit, bytes) = state.certificates.issue(&auth, id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=HabilitacionPrecaria_{}_Argentina.pdf",
                permit.numero_afap
            ),
        ),
    ];
    Ok((headers, bytes))
}

/// GET /api/afap/{id}/descargas
pub async fn descargas(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DownloadLog>>, ApiError> {
    Ok(Json(state.certificates.download_history(&auth, id).await?))
}
