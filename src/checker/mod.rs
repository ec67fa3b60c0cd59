// src/checker/mod.rs
mod batch;
mod probe;
mod result;
mod target;

pub use batch::{probe_all, BatchOptions, BatchProber};
pub use probe::{HttpProber, Prober, USER_AGENT};
pub use result::{ProbeOutcome, ProbeResult, TIMEOUT_MESSAGE, UNKNOWN_ERROR};
pub use target::{is_valid_url, ProbeTarget};
