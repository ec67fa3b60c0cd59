// src/config/models.rs
use crate::error::MonitorError;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_CONCURRENT: usize = 5;
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOG_FILE: &str = "uptime-monitor-results.log";
pub const DEFAULT_COMMIT_MESSAGE: &str = "🔍 Websites uptime check";
pub const DEFAULT_SUCCESS_CODES: [u16; 4] = [200, 201, 202, 204];
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Sites to probe. Accepts a list or a single newline-separated string.
    #[serde(deserialize_with = "deserialize_sites")]
    pub sites: Vec<String>,

    /// Per-request deadline in seconds.
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,

    pub max_concurrent: usize,
    pub timezone: String,
    pub log_file: PathBuf,
    pub commit_message: String,

    /// Statuses counted as "up". Accepts a list or a comma-separated string.
    #[serde(deserialize_with = "deserialize_success_codes")]
    pub success_codes: Vec<u16>,

    pub create_issue: bool,
    pub github: GitHubConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    /// Falls back to `GITHUB_TOKEN` when unset.
    pub token: Option<String>,
    /// `owner/repo`; falls back to `GITHUB_REPOSITORY` when unset.
    pub repository: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub enabled: bool,
    pub user_name: String,
    pub user_email: String,
    /// Working tree to run git in; the current directory when unset.
    pub repo_dir: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sites: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timezone: DEFAULT_TIMEZONE.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            success_codes: DEFAULT_SUCCESS_CODES.to_vec(),
            create_issue: true,
            github: GitHubConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API.to_string(),
            token: None,
            repository: None,
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_name: "github-actions".to_string(),
            user_email: "github-actions@users.noreply.github.com".to_string(),
            repo_dir: None,
        }
    }
}

impl MonitorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.max_concurrent == 0 {
            return Err(MonitorError::Config(
                "max_concurrent must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(MonitorError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SitesInput {
    List(Vec<String>),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodesInput {
    List(Vec<u16>),
    Single(u16),
    Text(String),
}

fn deserialize_sites<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let lines: Vec<String> = match SitesInput::deserialize(deserializer)? {
        SitesInput::List(list) => list,
        SitesInput::Text(text) => vec![text],
    };

    Ok(lines
        .iter()
        .flat_map(|entry| entry.split('\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

fn deserialize_success_codes<'de, D>(deserializer: D) -> Result<Vec<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CodesInput::deserialize(deserializer)? {
        CodesInput::List(codes) => codes,
        CodesInput::Single(code) => vec![code],
        CodesInput::Text(text) => parse_success_codes(&text),
    })
}

/// Parses a comma-separated status list, dropping entries that are not numbers.
pub fn parse_success_codes(text: &str) -> Vec<u16> {
    text.split(',')
        .filter_map(|code| code.trim().parse::<u16>().ok())
        .collect()
}
