//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered actor in the habilitaciones system.
///
/// The CUIT/CUIL is the unique tax identifier citizens log in with.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// CUIT/CUIL tax identifier (unique).
    pub cuit_cuil: String,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// Contact phone number.
    pub telefono: String,
    /// Assigned role, immutable after registration.
    pub role: UserRole,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name, "nombre apellido".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// CUIT/CUIL tax identifier.
    pub cuit_cuil: String,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// Contact phone number.
    pub telefono: String,
    /// Requested role.
    pub role: UserRole,
    /// Pre-hashed password.
    pub password_hash: String,
}

impl CreateUser {
    /// Materialize a full [`User`] with a fresh id and timestamp.
    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            email: self.email,
            cuit_cuil: self.cuit_cuil,
            nombre: self.nombre,
            apellido: self.apellido,
            telefono: self.telefono,
            role: self.role,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}
