//! # afap-api
//!
//! The HTTP layer: Axum router, application state, bearer-auth extractor,
//! request DTOs, error mapping, and middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::serve;
pub use router::build_router;
pub use state::AppState;
