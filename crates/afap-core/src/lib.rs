//! # afap-core
//!
//! Core crate for the AFAP habilitaciones service. Contains the unified
//! error system, configuration schemas, shared types, and the capability
//! traits implemented by the outer crates.
//!
//! This crate has **no** internal dependencies on other AFAP crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
