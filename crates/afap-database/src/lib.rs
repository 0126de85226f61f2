//! # afap-database
//!
//! The `Store` capability: backend-neutral async store traits plus two
//! implementations — PostgreSQL (sqlx) and a process-local in-memory
//! store used for demo mode and tests.

pub mod memory;
pub mod postgres;
pub mod store;

pub use store::{DownloadLogStore, InspectionStore, PermitStore, Store, UserStore};
