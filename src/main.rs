//! AFAP Habilitaciones Server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use afap_api::AppState;
use afap_core::config::AppConfig;
use afap_core::error::AppError;
use afap_database::Store;

#[tokio::main]
async fn main() {
    // Local development reads secrets from a .env file.
    let _ = dotenvy::dotenv();

    let env = std::env::var("AFAP_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Connect the store, build the state, and serve.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.database.backend,
        "Starting AFAP Habilitaciones"
    );

    let store = Store::connect(&config.database).await?;
    let state = AppState::new(config, store);
    afap_api::serve(state).await
}
