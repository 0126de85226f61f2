//! Route definitions for the habilitaciones HTTP API.
//!
//! All domain routes are mounted under `/api`; the public verification
//! endpoint lives there too but requires no credentials.

use axum::http::HeaderValue;
use axum::middleware as axum_middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use afap_core::config::AppConfig;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(afap_routes())
        .merge(inspection_routes())
        .merge(public_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health))
        .route("/seed", post(handlers::seed::seed));

    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Permit CRUD, lifecycle, and certificate endpoints.
fn afap_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/afap",
            post(handlers::permit::create).get(handlers::permit::list),
        )
        .route("/afap/{id}", get(handlers::permit::get))
        .route("/afap/{id}/estado", patch(handlers::permit::update_estado))
        .route("/afap/{id}/certificado", get(handlers::permit::certificado))
        .route("/afap/{id}/descargas", get(handlers::permit::descargas))
}

/// Inspection scheduling endpoints.
fn inspection_routes() -> Router<AppState> {
    Router::new().route(
        "/inspecciones",
        post(handlers::inspection::create).get(handlers::inspection::list),
    )
}

/// Unauthenticated endpoints.
fn public_routes() -> Router<AppState> {
    Router::new().route("/verificar/{id}", get(handlers::verification::verificar))
}

/// Reviewer/administrator endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/dashboard", get(handlers::stats::dashboard))
        .route("/admin/descargas", get(handlers::admin::descargas))
}

/// Build the CORS layer from configuration; `"*"` allows any origin.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.server.cors.allowed_origins;
    if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
