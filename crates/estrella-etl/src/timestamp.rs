use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Layout the expander writes, e.g. `2024-03-07 00:00:00.000`.
pub const EXPANDED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d 00:00:00.000";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Calendar date of a timestamp cell, or `None` when the text is not a
/// recognised timestamp. Offsets are dropped; the local date is kept.
#[must_use]
pub fn parse_timestamp_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
