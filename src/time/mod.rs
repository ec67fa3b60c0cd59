// src/time/mod.rs
//! ISO-8601 timestamps with a numeric UTC offset.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";
const ZONED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Current time in `timezone` as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
///
/// `"UTC"` (any case) and unknown zone names both render in UTC.
pub fn format_timestamp(timezone: &str) -> String {
    format_timestamp_at(Utc::now(), timezone)
}

pub fn format_timestamp_at(instant: DateTime<Utc>, timezone: &str) -> String {
    if timezone.eq_ignore_ascii_case("UTC") {
        return instant.format(UTC_FORMAT).to_string();
    }

    match timezone.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).format(ZONED_FORMAT).to_string(),
        Err(_) => {
            debug!("Unknown timezone '{}', falling back to UTC", timezone);
            instant.format(UTC_FORMAT).to_string()
        }
    }
}
