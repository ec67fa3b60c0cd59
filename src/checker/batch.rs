// src/checker/batch.rs
use super::probe::{HttpProber, Prober};
use super::result::{ProbeOutcome, ProbeResult, UNKNOWN_ERROR};
use super::target::ProbeTarget;
use crate::config::{DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMEZONE};
use crate::time::format_timestamp;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub timeout: Duration,
    pub max_concurrent: usize,
    pub timezone: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Probes targets in consecutive windows of at most `max_concurrent`.
///
/// A window's probes run concurrently and all of them settle before the
/// next window starts, so results come back in input order and no more
/// than `max_concurrent` requests are ever in flight.
pub struct BatchProber {
    prober: Arc<dyn Prober>,
    max_concurrent: usize,
    timezone: String,
}

impl BatchProber {
    pub fn new(prober: Arc<dyn Prober>, options: &BatchOptions) -> Self {
        Self {
            prober,
            max_concurrent: options.max_concurrent.max(1),
            timezone: options.timezone.clone(),
        }
    }

    /// Batch prober backed by `HttpProber`.
    pub fn http(options: &BatchOptions) -> Result<Self, reqwest::Error> {
        let prober = HttpProber::new(options.timeout, options.timezone.clone())?;
        Ok(Self::new(Arc::new(prober), options))
    }

    pub async fn probe_all(&self, targets: &[ProbeTarget]) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(targets.len());

        for (index, window) in targets.chunks(self.max_concurrent).enumerate() {
            debug!(window = index, size = window.len(), "Dispatching probe window");

            let tasks = window.iter().map(|target| {
                let prober = self.prober.clone();
                let target = target.clone();
                tokio::spawn(async move { prober.probe(&target).await })
            });

            // join_all keeps the order of the window
            let settled = join_all(tasks).await;

            for (target, outcome) in window.iter().zip(settled) {
                let result = match outcome {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Probe task for {} failed: {}", target, e);
                        self.internal_failure(target, e)
                    }
                };
                results.push(result);
            }
        }

        info!("Probed {} site(s)", results.len());
        results
    }

    fn internal_failure(&self, target: &ProbeTarget, err: JoinError) -> ProbeResult {
        ProbeResult::from_outcome(
            target.as_str(),
            ProbeOutcome::InternalError(join_error_message(err)),
            Duration::ZERO,
            format_timestamp(&self.timezone),
        )
    }
}

/// Probes every target over HTTP, returning one result per target in order.
pub async fn probe_all(
    targets: &[ProbeTarget],
    options: &BatchOptions,
) -> Result<Vec<ProbeResult>, reqwest::Error> {
    Ok(BatchProber::http(options)?.probe_all(targets).await)
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_ERROR.to_string()
    }
}
