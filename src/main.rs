// src/main.rs
use anyhow::Result;
use tracing::{error, info};

use uptime_monitor::{config, monitor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_monitor=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "uptime.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    match monitor::run(&config).await {
        Ok(summary) => {
            monitor::publish_outputs(&summary).await?;
            Ok(())
        }
        Err(e) => {
            error!("Uptime check failed: {}", e);
            std::process::exit(1);
        }
    }
}
