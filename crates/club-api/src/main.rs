//! Club API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p club-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use anyhow::Context;
use club_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Tracing comes up before the config so load errors are logged; a bad
    // APP_ENV is reported by the config loader itself
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|s| s.parse::<Environment>().ok())
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!("Server failed to start: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Club API Server...");

    let config = AppConfig::from_env().context("failed to load configuration")?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        half_min_months = config.progression.half_min_months,
        "Configuration loaded"
    );

    club_api::run(config).await?;

    Ok(())
}
