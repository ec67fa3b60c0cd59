// src/error.rs
use crate::alert::GitHubError;
use thiserror::Error;

/// Errors that stop an uptime run.
///
/// Probe failures never show up here: they are recorded in the
/// `ProbeResult` of the affected site instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("No valid sites were provided. Please specify at least one valid HTTP/HTTPS URL.")]
    NoValidSites,

    #[error("GITHUB_TOKEN is not defined. Please pass it in via env: in your workflow.")]
    MissingToken,

    #[error("Invalid repository '{0}', expected 'owner/repo'")]
    InvalidRepository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {command} exited with {status}: {stderr}")]
    Git {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
