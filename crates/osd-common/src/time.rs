//! Timestamp formatting for on-screen display.

use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Display format used by the timestamp widget.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert Unix seconds to a UTC datetime, rejecting out-of-range values.
pub fn from_unix_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

/// Write `seconds` as `YYYY-MM-DD HH:MM:SS` into `out`, replacing its
/// contents. Returns false when the timestamp is not representable.
pub fn write_display_time(out: &mut String, seconds: i64) -> bool {
    out.clear();
    match from_unix_seconds(seconds) {
        Some(dt) => write!(out, "{}", dt.format(DISPLAY_FORMAT)).is_ok(),
        None => false,
    }
}
