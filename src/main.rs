use anyhow::{Result, anyhow};
use ayre_rust::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Builds the log filter. `RUST_LOG` directives win over the configured level.
fn log_filter(configured_level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    configured_level.parse::<LevelFilter>().map_err(|_| {
        anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            configured_level
        )
    })?;

    Ok(EnvFilter::try_new(configured_level)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the loaded config, so load it first
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let filter = match log_filter(&config.server.logs.level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        provider = ?config.llm.provider,
        model = %config.llm.model,
        response_mode = ?config.server.response_mode,
        "Starting Ayre server"
    );

    server::run(config).await?;

    Ok(())
}
