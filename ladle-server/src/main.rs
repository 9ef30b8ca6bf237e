//! ladle-server: recipe management REST backend
//!
//! Long-running service that:
//! - Registers users and issues opaque bearer tokens
//! - Manages per-user recipes with nested tags and ingredients
//! - Handles recipe image upload to local media storage

mod api;
mod auth;
mod config;
mod db;
mod error;
mod media;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ladle_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting ladle-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    // Build router
    let app = api::create_router(state);

    // Start HTTP server
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("ladle-server HTTP listening on {http_addr}");

    axum::serve(http_listener, app).await?;

    Ok(())
}
