//! Request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use afap_entity::permit::PermitStatus;
use afap_entity::user::UserRole;

/// POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    /// CUIT/CUIL tax identifier.
    #[validate(length(min = 11, max = 13, message = "CUIT/CUIL inválido"))]
    pub cuit_cuil: String,
    /// First name.
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    /// Last name.
    #[validate(length(min = 1, message = "El apellido es obligatorio"))]
    pub apellido: String,
    /// Contact phone.
    #[validate(length(min = 1, message = "El teléfono es obligatorio"))]
    pub telefono: String,
    /// Requested role; defaults to citizen.
    #[serde(default = "default_role")]
    pub role: UserRole,
    /// Plaintext password.
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// CUIT/CUIL tax identifier.
    pub cuit_cuil: String,
    /// Plaintext password.
    pub password: String,
}

/// PATCH /api/afap/{id}/estado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEstadoRequest {
    /// New lifecycle state.
    pub estado: PermitStatus,
    /// Optional reviewer annotation.
    #[serde(default)]
    pub observaciones: Option<String>,
    /// Version the reviewer read; stale values are rejected.
    #[serde(default)]
    pub version: Option<i64>,
}

fn default_role() -> UserRole {
    UserRole::Citizen
}
