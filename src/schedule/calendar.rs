// src/schedule/calendar.rs

//! Calendar-day arithmetic shared by the scheduler, the display and the
//! codecs. Everything works on `NaiveDate`, so time of day never leaks in.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::errors::{DuelistError, Result};

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `date + days`, saturating at chrono's maximum date.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// The first `weekday` strictly after `today`.
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = today.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let ahead = match (target + 7 - current) % 7 {
        0 => 7,
        n => n,
    };
    add_days(today, u64::from(ahead))
}

/// Years every task file layout can hold; the compact form has four digits.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Reject dates the task file could not store.
pub fn ensure_storable(date: NaiveDate) -> Result<NaiveDate> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(DuelistError::ParseError(format!(
            "{date} is outside years {}-{}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

/// Parse the compact `yyyymmdd` form used by the legacy file layout.
pub fn parse_compact_date(s: &str) -> Result<NaiveDate> {
    let invalid = || DuelistError::ParseError(format!("'{s}' is not a yyyymmdd date"));

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = s[6..8].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

pub fn format_compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
