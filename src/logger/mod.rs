// src/logger/mod.rs
//! Append-only text log of probe results.

use crate::checker::ProbeResult;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const LOG_HEADER: &str = "# Uptime Monitor Log\n\n";
pub const RUN_SEPARATOR: &str = "\n---\n";

/// Creates the log (and its directory) if missing. Never truncates an
/// existing file.
pub async fn ensure_log_file(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).await?;
        }
    }

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(mut file) => {
            file.write_all(LOG_HEADER.as_bytes()).await?;
            file.flush().await?;
            tracing::info!("Created log file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn append_log_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> std::io::Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await
}

/// Last `count` trimmed lines of the log.
pub async fn last_lines(path: &Path, count: usize) -> std::io::Result<Vec<String>> {
    let data = fs::read_to_string(path).await?;
    let lines: Vec<String> = data
        .trim()
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect();

    let skip = lines.len().saturating_sub(count);
    Ok(lines.into_iter().skip(skip).collect())
}

pub fn format_log_line(result: &ProbeResult) -> String {
    let base = format!(
        "[{}] {} → Status: {}, Response: {:.3}s",
        result.timestamp, result.url, result.http_status, result.elapsed_seconds
    );

    match &result.error_message {
        Some(message) => format!("{base}, Error: {message}\n"),
        None => format!("{base}\n"),
    }
}
