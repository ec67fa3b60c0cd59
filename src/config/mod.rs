// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use std::path::Path;

/// Prefix of the environment variables that override file settings,
/// e.g. `UPTIME_SITES` or `UPTIME_MAX_CONCURRENT`.
pub const ENV_PREFIX: &str = "UPTIME";

/// Load configuration from an optional file (YAML or JSON) layered under
/// `UPTIME_*` environment variables.
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<MonitorConfig> {
    load_config_with_prefix(path, ENV_PREFIX).await
}

pub(crate) async fn load_config_with_prefix<P: AsRef<Path>>(
    path: P,
    env_prefix: &str,
) -> Result<MonitorConfig> {
    let path = path.as_ref();
    let mut builder = config::Config::builder();

    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        let contents = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;
        builder = builder.add_source(File::from_str(&contents, file_format(path)));
    } else {
        tracing::debug!("No config file at {}, using defaults and environment", path.display());
    }

    let config: MonitorConfig = builder
        .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
        .build()
        .context("Failed to merge configuration sources")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}

fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => FileFormat::Json,
    }
}
