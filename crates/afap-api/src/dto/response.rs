//! Response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use afap_entity::permit::PermitStatus;
use afap_entity::user::User;

/// Bearer token response for register/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// The authenticated user.
    pub user: User,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Result body of a status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadoResponse {
    /// Confirmation message.
    pub message: String,
    /// State before the update.
    pub old_estado: PermitStatus,
    /// State after the update.
    pub new_estado: PermitStatus,
    /// Version after the update.
    pub version: i64,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"unhealthy"`.
    pub status: String,
    /// Store connectivity: `"healthy"` or `"unhealthy"`.
    pub database: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}
