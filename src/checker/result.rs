// src/checker/result.rs
use serde::Serialize;
use std::time::Duration;

pub const TIMEOUT_MESSAGE: &str = "Timeout";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// How a single probe ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An HTTP response arrived; any status code counts.
    Responded(u16),
    /// The deadline elapsed before a response arrived.
    TimedOut,
    /// DNS, connect, TLS or protocol failure.
    TransportFailed(String),
    /// The probe task itself failed before producing a result.
    InternalError(String),
}

impl ProbeOutcome {
    /// Status recorded for this outcome, `0` when no response was obtained.
    pub fn status(&self) -> u16 {
        match self {
            ProbeOutcome::Responded(status) => *status,
            _ => 0,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            ProbeOutcome::Responded(_) => None,
            ProbeOutcome::TimedOut => Some(TIMEOUT_MESSAGE.to_string()),
            ProbeOutcome::TransportFailed(message) | ProbeOutcome::InternalError(message) => {
                if message.is_empty() {
                    Some(UNKNOWN_ERROR.to_string())
                } else {
                    Some(message.clone())
                }
            }
        }
    }
}

/// Uniform record for one probed site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub url: String,
    pub http_status: u16,
    pub elapsed_seconds: f64,
    pub error_message: Option<String>,
    pub timestamp: String,
}

impl ProbeResult {
    pub fn from_outcome(
        url: impl Into<String>,
        outcome: ProbeOutcome,
        elapsed: Duration,
        timestamp: String,
    ) -> Self {
        Self {
            url: url.into(),
            http_status: outcome.status(),
            // millisecond resolution
            elapsed_seconds: elapsed.as_millis() as f64 / 1000.0,
            error_message: outcome.error_message(),
            timestamp,
        }
    }

    /// Whether a response was received at all.
    pub fn responded(&self) -> bool {
        self.http_status != 0
    }

    pub fn is_success(&self, success_codes: &[u16]) -> bool {
        success_codes.contains(&self.http_status)
    }
}
