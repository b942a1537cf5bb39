//! Jakarta-anchored civil-day handling.
//!
//! Dates cross the API as `YYYY-MM-DD` text and live in the domain as
//! [`NaiveDate`] civil days anchored to the fixed +07:00 offset. Storage
//! keeps the UTC instant of civil midnight, seven hours earlier:
//!
//! `2024-10-22` ⇄ `2024-10-21T17:00:00Z`
//!
//! The offset is fixed and DST-free; there is deliberately no timezone
//! database here.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::{DomainError, ErrorCode};

const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

fn jakarta_offset() -> FixedOffset {
    // +07:00 is always in range for FixedOffset.
    FixedOffset::east_opt(JAKARTA_OFFSET_SECS).unwrap()
}

/// Parses a `YYYY-MM-DD` string into a civil date.
///
/// The format is checked first (`InvalidDateFormat`), then the calendar
/// value (`InvalidDate`), so `2024-2-3` and `2024-02-31` fail differently.
/// The label names the field in error messages.
pub fn parse_civil_date(value: &str, label: &str) -> Result<NaiveDate, DomainError> {
    let value = value.trim();
    if !matches_date_pattern(value) {
        return Err(DomainError::new(
            ErrorCode::InvalidDateFormat,
            format!("Invalid {} format. Expected YYYY-MM-DD.", label),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        DomainError::new(ErrorCode::InvalidDate, format!("Invalid {} value.", label))
    })
}

fn matches_date_pattern(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Converts a civil date to the UTC instant of its Jakarta midnight.
pub fn civil_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(jakarta_offset())
        .unwrap()
        .with_timezone(&Utc)
}

/// Converts a stored UTC instant back to the civil day it falls in.
pub fn utc_to_civil(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&jakarta_offset()).date_naive()
}

/// Returns the civil day containing the given instant.
///
/// This defines "today" for the trailing mood window regardless of the
/// server clock zone.
pub fn civil_today(now: DateTime<Utc>) -> NaiveDate {
    utc_to_civil(now)
}
