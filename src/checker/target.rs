// src/checker/target.rs
use std::fmt;
use url::Url;

/// Returns true iff `candidate` is an absolute `http` or `https` URL.
pub fn is_valid_url(candidate: &str) -> bool {
    parse_web_url(candidate).is_some()
}

fn parse_web_url(candidate: &str) -> Option<Url> {
    Url::parse(candidate)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// A validated site URL.
///
/// Keeps the string exactly as configured so that log lines and alerts
/// show what the user wrote rather than the normalised form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    raw: String,
    url: Url,
}

impl ProbeTarget {
    pub fn parse(candidate: &str) -> Option<Self> {
        parse_web_url(candidate).map(|url| Self {
            raw: candidate.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
