//! Relative day and clock-time resolution.
//!
//! All instants are produced in UTC; display-time conversion belongs to the
//! caller.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

const CLOCK_FORMAT: &str = "%H:%M";

/// `anchor + (day_index - 1)` days. Day 1 is the anchor itself.
///
/// Indices of zero or below resolve to dates before the anchor. Returns
/// `None` only when the result falls outside chrono's date range.
pub fn resolve_day(anchor: NaiveDate, day_index: i64) -> Option<NaiveDate> {
    let offset = day_index.checked_sub(1)?;
    if offset >= 0 {
        anchor.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        anchor.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Combine a calendar date and a wall-clock time into a UTC instant.
pub fn resolve_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Parse a 24-hour `HH:MM` token. Seconds are always zero.
pub fn parse_clock(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token.trim(), CLOCK_FORMAT).ok()
}
