//! Guild API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p guild-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` when present).

use guild_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|raw| raw.parse::<Environment>().ok())
        .unwrap_or_default();

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Guild API Server...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        storage = ?config.storage.backend,
        sessions = ?config.session.backend,
        "Configuration loaded"
    );

    guild_api::run(config).await?;

    Ok(())
}
