//! Install-after date validation

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::SystemTime;
use thiserror::Error;

/// Format Munki expects for `force_install_after_date`, e.g. `2011-08-03T13:00:00Z`.
pub const INSTALL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// chrono accepts unpadded fields and signed years, so the shape is checked first.
static INSTALL_DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date '{0}': expected format yyyy-mm-ddThh:mm:ssZ (e.g. 2011-08-03T13:00:00Z)")]
    Format(String),
}

/// Returns true iff `date` is exactly `YYYY-MM-DDTHH:MM:SSZ` and names a real
/// calendar instant. The empty string is not a valid date.
pub fn is_valid_date(date: &str) -> bool {
    parse_strict(date).is_some()
}

/// Parse a CLI date argument.
///
/// An empty (or whitespace-only) argument is a request to remove the date and
/// yields `Ok(None)`.
pub fn parse_install_date(date: &str) -> Result<Option<NaiveDateTime>, DateError> {
    if date.trim().is_empty() {
        return Ok(None);
    }
    parse_strict(date).map(Some).ok_or_else(|| DateError::Format(date.to_string()))
}

/// Convert a parsed UTC date into the plist date type.
pub fn to_plist_date(date: NaiveDateTime) -> plist::Date {
    let utc: DateTime<Utc> = Utc.from_utc_datetime(&date);
    plist::Date::from(SystemTime::from(utc))
}

fn parse_strict(date: &str) -> Option<NaiveDateTime> {
    if !INSTALL_DATE_SHAPE.is_match(date) {
        return None;
    }
    let parsed = NaiveDateTime::parse_from_str(date, INSTALL_DATE_FORMAT).ok()?;
    // chrono folds a `:60` leap second into the nanosecond field
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(parsed)
}
