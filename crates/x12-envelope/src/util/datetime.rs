//! Date and time formats used by ISA and GS headers.
//!
//! - ISA09: `YYMMDD`, two-digit year in a fixed 1969-2068 window
//! - GS04: `CCYYMMDD`
//! - ISA10, GS05: `HHMM` (GS05 may also carry seconds)

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::ValueError;
use crate::limits::{MAX_ISA_YEAR, MIN_ISA_YEAR};

/// Formats a date as `CCYYMMDD` (GS04).
pub fn format_date_ccyymmdd(field: &'static str, date: NaiveDate) -> Result<String, ValueError> {
    let year = date.year();
    if !(0..=9999).contains(&year) {
        return Err(ValueError::DateOutOfRange {
            field,
            year,
            min: 0,
            max: 9999,
        });
    }
    Ok(format!("{:04}{:02}{:02}", year, date.month(), date.day()))
}

/// Formats a date as `YYMMDD` (ISA09).
///
/// Only years that parse back to themselves are accepted, see
/// [`parse_date_yymmdd`].
pub fn format_date_yymmdd(field: &'static str, date: NaiveDate) -> Result<String, ValueError> {
    let year = date.year();
    if !(MIN_ISA_YEAR..=MAX_ISA_YEAR).contains(&year) {
        return Err(ValueError::DateOutOfRange {
            field,
            year,
            min: MIN_ISA_YEAR,
            max: MAX_ISA_YEAR,
        });
    }
    Ok(format!("{:02}{:02}{:02}", year % 100, date.month(), date.day()))
}

/// Formats a time as `HHMM` (ISA10, GS05).
pub fn format_time_hhmm(time: NaiveTime) -> String {
    format!("{:02}{:02}", time.hour(), time.minute())
}

/// Parses `CCYYMMDD`.
pub fn parse_date_ccyymmdd(value: &str) -> Result<NaiveDate, &'static str> {
    let digits = parse_digits(value, 8, "expected CCYYMMDD")?;
    NaiveDate::from_ymd_opt(digits / 10_000, (digits / 100 % 100) as u32, (digits % 100) as u32)
        .ok_or("not a calendar date")
}

/// Parses `YYMMDD`; years 69-99 map to 1969-1999 and 00-68 to 2000-2068.
pub fn parse_date_yymmdd(value: &str) -> Result<NaiveDate, &'static str> {
    let digits = parse_digits(value, 6, "expected YYMMDD")?;
    let yy = digits / 10_000;
    let year = if yy >= MIN_ISA_YEAR % 100 { 1900 + yy } else { 2000 + yy };
    NaiveDate::from_ymd_opt(year, (digits / 100 % 100) as u32, (digits % 100) as u32)
        .ok_or("not a calendar date")
}

/// Parses `HHMM`, or `HHMMSS` when seconds are present.
pub fn parse_time(value: &str) -> Result<NaiveTime, &'static str> {
    let (hour, minute, second) = match value.len() {
        4 => {
            let digits = parse_digits(value, 4, "expected HHMM")?;
            (digits / 100, digits % 100, 0)
        }
        6 => {
            let digits = parse_digits(value, 6, "expected HHMMSS")?;
            (digits / 10_000, digits / 100 % 100, digits % 100)
        }
        _ => return Err("expected HHMM or HHMMSS"),
    };
    NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32).ok_or("not a time of day")
}

fn parse_digits(value: &str, len: usize, reason: &'static str) -> Result<i32, &'static str> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reason);
    }
    value.parse().map_err(|_| reason)
}
