//! Timestamp reading shared by the classifier and the monthly aggregator.
//!
//! Wall-clock values are taken as the timestamp itself encodes them: an
//! RFC 3339 value is read in its own offset and never converted to another
//! zone, a naive value is read as written.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};

// `%#z` takes `Z`, `+05`, `+0500` and `+05:00`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
    "%Y%m%dT%H%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const CLOCK_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

/// Local date and time of an ISO-8601 timestamp, or `None` if unparseable.
pub fn local_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Local hour (0-23). Also accepts bare clock strings such as `"7:30 PM"`.
pub fn local_hour(raw: &str) -> Option<u32> {
    if let Some(dt) = local_date_time(raw) {
        return Some(dt.hour());
    }
    clock_time(raw).map(|t| t.hour())
}

fn clock_time(raw: &str) -> Option<NaiveTime> {
    let normalized = raw.trim().to_ascii_uppercase();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
}
