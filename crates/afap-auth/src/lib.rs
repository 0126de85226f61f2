//! # afap-auth
//!
//! The `AuthProvider` capability: password hashing and verification,
//! bearer-token issuance and validation, and the account service that
//! registers users and resolves credentials to actors.

pub mod jwt;
pub mod password;
pub mod service;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};
pub use service::{AccountService, IssuedToken, NewAccount};
