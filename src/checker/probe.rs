// src/checker/probe.rs
use super::result::{ProbeOutcome, ProbeResult};
use super::target::ProbeTarget;
use crate::time::format_timestamp;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::error::Error as StdError;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::debug;

pub const USER_AGENT: &str = "GitHub-Actions-Uptime-Monitor/1.0";

/// Probes a single target. Implementations never fail: every outcome is
/// folded into the returned `ProbeResult`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &ProbeTarget) -> ProbeResult;
}

/// Issues one timeout-bound `GET` per probe.
pub struct HttpProber {
    client: Client,
    timeout: Duration,
    timezone: String,
}

impl HttpProber {
    pub fn new(timeout: Duration, timezone: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            timeout,
            timezone: timezone.into(),
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &ProbeTarget) -> ProbeResult {
        let timestamp = format_timestamp(&self.timezone);
        let start = Instant::now();

        // Dropping the timed-out future cancels the request and its timer.
        let result = timeout(self.timeout, self.client.get(target.url().clone()).send()).await;
        let elapsed = start.elapsed();

        let outcome = classify(result);

        debug!(
            url = %target,
            status = outcome.status(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Probe settled"
        );

        ProbeResult::from_outcome(target.as_str(), outcome, elapsed, timestamp)
    }
}

/// Only the configured deadline counts as a timeout; any error reqwest
/// reports, including its own connect timeouts, is a transport failure.
fn classify<E>(result: Result<Result<Response, reqwest::Error>, E>) -> ProbeOutcome {
    match result {
        Ok(Ok(response)) => ProbeOutcome::Responded(response.status().as_u16()),
        Ok(Err(e)) => ProbeOutcome::TransportFailed(describe(&e)),
        Err(_) => ProbeOutcome::TimedOut,
    }
}

/// Flattens an error and its sources into one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
