// src/monitor/mod.rs
//! One uptime run: probe, log, alert, commit.

use crate::alert::{compose_issue, parse_repository, FailureReport, GitHubClient, LOG_EXCERPT_LINES};
use crate::checker::{
    is_valid_url, BatchOptions, BatchProber, HttpProber, ProbeResult, ProbeTarget, Prober,
};
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::git::GitRepo;
use crate::logger::{append_log_lines, ensure_log_file, format_log_line, last_lines, RUN_SEPARATOR};
use crate::time::format_timestamp;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub failed_sites: usize,
    pub total_sites: usize,
    pub log_file_path: PathBuf,
}

impl RunSummary {
    /// Step outputs as `(name, value)` pairs.
    pub fn outputs(&self) -> [(&'static str, String); 3] {
        [
            ("failed-sites", self.failed_sites.to_string()),
            ("total-sites", self.total_sites.to_string()),
            ("log-file-path", self.log_file_path.display().to_string()),
        ]
    }
}

/// Keeps the valid `http`/`https` sites, warning about the rest.
pub fn parse_targets(sites: &[String]) -> Vec<ProbeTarget> {
    sites
        .iter()
        .flat_map(|entry| entry.split('\n'))
        .map(str::trim)
        .filter(|site| !site.is_empty())
        .filter(|site| {
            let valid = is_valid_url(site);
            if !valid {
                warn!("Invalid URL skipped: {}", site);
            }
            valid
        })
        .filter_map(ProbeTarget::parse)
        .collect()
}

pub async fn run(config: &MonitorConfig) -> Result<RunSummary, MonitorError> {
    let prober = HttpProber::new(config.timeout(), config.timezone.clone())?;
    run_with_prober(config, Arc::new(prober)).await
}

pub async fn run_with_prober(
    config: &MonitorConfig,
    prober: Arc<dyn Prober>,
) -> Result<RunSummary, MonitorError> {
    config.validate()?;

    let targets = parse_targets(&config.sites);
    if targets.is_empty() {
        return Err(MonitorError::NoValidSites);
    }

    ensure_log_file(&config.log_file).await?;

    let options = BatchOptions {
        timeout: config.timeout(),
        max_concurrent: config.max_concurrent,
        timezone: config.timezone.clone(),
    };
    let results = BatchProber::new(prober, &options).probe_all(&targets).await;

    let mut lines = vec![RUN_SEPARATOR.to_string()];
    lines.extend(results.iter().map(format_log_line));
    append_log_lines(&config.log_file, &lines).await?;

    let failures = FailureReport::from_results(&results, &config.success_codes);

    if !failures.is_empty() && config.create_issue {
        info!("One or more sites returned non-success. Creating an issue…");
        file_issue(config, &failures).await?;
    } else if failures.is_empty() {
        info!("All sites returned success codes.");
    } else {
        warn!("{} site(s) failed; issue creation is disabled", failures.len());
    }

    if config.git.enabled {
        GitRepo::from_config(&config.git)
            .commit_log(&config.git, &config.log_file, &config.commit_message)
            .await?;
    }

    let summary = summarize(&results, config);
    info!(
        "Uptime check finished: {}/{} site(s) failing",
        summary.failed_sites, summary.total_sites
    );
    Ok(summary)
}

fn summarize(results: &[ProbeResult], config: &MonitorConfig) -> RunSummary {
    RunSummary {
        failed_sites: results
            .iter()
            .filter(|r| !r.is_success(&config.success_codes))
            .count(),
        total_sites: results.len(),
        log_file_path: config.log_file.clone(),
    }
}

async fn file_issue(config: &MonitorConfig, failures: &FailureReport) -> Result<(), MonitorError> {
    let now = format_timestamp(&config.timezone);
    let excerpt = last_lines(&config.log_file, LOG_EXCERPT_LINES).await?;
    let issue = compose_issue(&now, failures, &excerpt);

    let token = config
        .github
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .filter(|token| !token.is_empty())
        .ok_or(MonitorError::MissingToken)?;
    let repository = config
        .github
        .repository
        .clone()
        .or_else(|| std::env::var("GITHUB_REPOSITORY").ok())
        .unwrap_or_default();
    let (owner, repo) = parse_repository(&repository)?;

    GitHubClient::new(config.github.api_url.as_str(), token)?
        .create_issue(&owner, &repo, &issue)
        .await?;
    Ok(())
}

/// Appends the summary to `$GITHUB_OUTPUT` when set, otherwise logs it.
pub async fn publish_outputs(summary: &RunSummary) -> Result<(), MonitorError> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => write_outputs(Path::new(&path), summary).await,
        None => {
            for (name, value) in summary.outputs() {
                info!("{}={}", name, value);
            }
            Ok(())
        }
    }
}

async fn write_outputs(path: &Path, summary: &RunSummary) -> Result<(), MonitorError> {
    let contents: String = summary
        .outputs()
        .iter()
        .map(|(name, value)| format!("{name}={value}\n"))
        .collect();

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
