// src/git/mod.rs
use crate::config::GitConfig;
use crate::error::MonitorError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Runs git in one working tree.
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &GitConfig) -> Self {
        Self::new(config.repo_dir.clone().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Stages `log_file` and, if anything changed, commits and pushes it.
    /// Returns whether a commit was made.
    pub async fn commit_log(
        &self,
        config: &GitConfig,
        log_file: &Path,
        message: &str,
    ) -> Result<bool, MonitorError> {
        info!("Staging & committing {}", log_file.display());

        self.run(&["config", "user.name", config.user_name.as_str()]).await?;
        self.run(&["config", "user.email", config.user_email.as_str()]).await?;

        let log_file = log_file.to_string_lossy().into_owned();
        self.run(&["add", log_file.as_str()]).await?;

        if !self.has_changes().await? {
            info!("No changes to commit.");
            return Ok(false);
        }

        self.run(&["commit", "-m", message]).await?;
        self.run(&["push"]).await?;
        info!("Log file committed and pushed.");
        Ok(true)
    }

    pub async fn has_changes(&self) -> Result<bool, MonitorError> {
        let status = self.run(&["status", "--porcelain"]).await?;
        Ok(!status.trim().is_empty())
    }

    async fn run(&self, args: &[&str]) -> Result<String, MonitorError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(MonitorError::Git {
                command: args.first().copied().unwrap_or_default().to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
