//! Account service: registration, login, and bearer resolution.
//!
//! This is the `AuthProvider` the rest of the system consumes: it turns a
//! bearer credential into an [`User`] (id + role) and owns the
//! registration/login flows.

use std::sync::Arc;

use tracing::info;

use afap_core::config::auth::AuthConfig;
use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_database::UserStore;
use afap_entity::user::{CreateUser, User, UserRole};

use crate::jwt::encoder::AccessToken;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordPolicy};

/// Registration payload (validated at the API boundary).
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Email address.
    pub email: String,
    /// CUIT/CUIL tax identifier.
    pub cuit_cuil: String,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// Contact phone.
    pub telefono: String,
    /// Requested role.
    pub role: UserRole,
    /// Plaintext password.
    pub password: String,
}

/// A user plus the bearer token issued for them.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The authenticated user.
    pub user: User,
    /// The issued access token.
    pub access: AccessToken,
}

/// Registers users and resolves credentials to actors.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            policy: PasswordPolicy::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Registers a new account and issues its first token.
    ///
    /// Duplicate cuit_cuil or email is a conflict.
    pub async fn register(&self, account: NewAccount) -> AppResult<IssuedToken> {
        if self.users.find_by_cuit(&account.cuit_cuil).await?.is_some() {
            return Err(AppError::conflict("El CUIT/CUIL ya está registrado"));
        }
        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(AppError::conflict("El email ya está registrado"));
        }

        self.policy.validate(&account.password)?;
        let password_hash = self.hasher.hash_password(&account.password)?;

        let user = CreateUser {
            email: account.email,
            cuit_cuil: account.cuit_cuil,
            nombre: account.nombre,
            apellido: account.apellido,
            telefono: account.telefono,
            role: account.role,
            password_hash,
        }
        .into_user();

        self.users.insert(&user).await?;
        info!(user_id = %user.id, cuit_cuil = %user.cuit_cuil, "Registered new user");

        let access = self.encoder.generate(&user)?;
        Ok(IssuedToken { user, access })
    }

    /// Authenticates by CUIT/CUIL + password and issues a token.
    pub async fn login(&self, cuit_cuil: &str, password: &str) -> AppResult<IssuedToken> {
        let user = self
            .users
            .find_by_cuit(cuit_cuil)
            .await?
            .ok_or_else(|| AppError::unauthorized("CUIT/CUIL o contraseña incorrectos"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("CUIT/CUIL o contraseña incorrectos"));
        }

        let access = self.encoder.generate(&user)?;
        Ok(IssuedToken { user, access })
    }

    /// Resolves a bearer token to the user it was issued for.
    ///
    /// The user is re-read from the store so revoked/deleted accounts stop
    /// resolving even while their token is still within its TTL.
    pub async fn resolve_bearer(&self, token: &str) -> AppResult<User> {
        let claims = self.decoder.decode(token)?;
        self.users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("No se pudieron validar las credenciales"))
    }
}
