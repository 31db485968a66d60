// Localized timestamps for lifecycle logging

use crate::error::{DbError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// `YYYY-MM-DD HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Format epoch milliseconds in the given timezone
pub fn format_local(millis: i64, tz: Tz) -> String {
    let utc: DateTime<Utc> = DateTime::from_timestamp_millis(millis).unwrap_or_default();
    utc.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an IANA timezone name (e.g. `Asia/Tokyo`)
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DbError::Config(format!("unknown timezone: {}", name)))
}
