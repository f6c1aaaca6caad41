//! Unix timestamp helpers

use chrono::{DateTime, TimeZone, Utc};

/// Seconds since the epoch, the unit every persisted timestamp uses.
pub fn unix_seconds(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

pub fn from_unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
