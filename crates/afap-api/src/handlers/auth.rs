//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use afap_auth::{IssuedToken, NewAccount};
use afap_core::error::AppError;
use afap_entity::user::User;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let issued = state
        .accounts
        .register(NewAccount {
            email: req.email,
            cuit_cuil: req.cuit_cuil,
            nombre: req.nombre,
            apellido: req.apellido,
            telefono: req.telefono,
            role: req.role,
            password: req.password,
        })
        .await?;
    Ok(Json(token_response(issued)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state.accounts.login(&req.cuit_cuil, &req.password).await?;
    Ok(Json(token_response(issued)))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user.clone())
}

fn token_response(issued: IssuedToken) -> TokenResponse {
    TokenResponse {
        access_token: issued.access.token,
        token_type: "bearer".to_string(),
        user: issued.user,
        expires_at: issued.access.expires_at,
    }
}
