//! Stockdash Development API Server
//!
//! Run with: cargo run --bin stockdash-api
//!
//! Serves the menu resource and the auth endpoints from memory.
//!
//! # Configuration
//!
//! Read from the standard config locations (see `stockdash config`), then
//! environment variables:
//! - `STOCKDASH_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `STOCKDASH_API_PORT`: Port to listen on (default: 8080)
//! - `STOCKDASH_LOG_LEVEL`, `STOCKDASH_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use stockdash::api::{serve, AppState};
use stockdash::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = Config::resolve(config_path.as_deref())?;

    stockdash::logging::init(&config.logging)?;

    tracing::info!("Starting Stockdash API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Seed demo menus: {}", config.api.seed_demo_menus);
    if config.api.cors_origins.is_empty() {
        tracing::info!("CORS: any origin");
    } else {
        tracing::info!("CORS origins: {:?}", config.api.cors_origins);
    }

    let state = AppState::new(config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Stockdash API server stopped");
    Ok(())
}
