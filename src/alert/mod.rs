// src/alert/mod.rs
mod github;

pub use github::{GitHubClient, GitHubError};

use crate::checker::ProbeResult;
use crate::error::MonitorError;

/// Number of log lines embedded in an alert.
pub const LOG_EXCERPT_LINES: usize = 20;

/// Sites whose status fell outside the success list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FailureReport {
    pub lines: Vec<String>,
}

impl FailureReport {
    pub fn from_results(results: &[ProbeResult], success_codes: &[u16]) -> Self {
        let lines = results
            .iter()
            .filter(|result| !result.is_success(success_codes))
            .map(|result| {
                let suffix = result
                    .error_message
                    .as_ref()
                    .map(|message| format!(" ({message})"))
                    .unwrap_or_default();
                format!(
                    "* **{}** returned status **{}**{}\n",
                    result.url, result.http_status, suffix
                )
            })
            .collect();

        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub title: String,
    pub body: String,
}

pub fn compose_issue(now: &str, failures: &FailureReport, log_excerpt: &[String]) -> Issue {
    let title = format!("🚨 Uptime Alert: Site(s) down at {now}");
    let body = format!(
        "\nThe following site(s) returned a non-success HTTP status at **{now}**:\n\n\
         {}\n\n\
         <details>\n\
         <summary>Latest log excerpt</summary>\n\n\
         ```\n\
         {}\n\
         ```\n\
         </details>\n",
        failures.lines.concat(),
        log_excerpt.join("\n"),
    );

    Issue {
        title,
        body: body.trim().to_string(),
    }
}

/// Splits `owner/repo`.
pub fn parse_repository(repository: &str) -> Result<(String, String), MonitorError> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(MonitorError::InvalidRepository(repository.to_string())),
    }
}
