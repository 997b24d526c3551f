//! Calendar utilities for addressing the daily climate archive.
//!
//! The grid store addresses its time axis with an integer derived from the
//! calendar date alone: `year * days_in_year(year) + day_of_year`, where the
//! day of year is zero-based. The value must be reproducible bit-for-bit, so
//! nothing here depends on time zones or clocks.

use chrono::{Datelike, NaiveDate};

use crate::error::{ClimateError, ClimateResult};

/// Date format accepted on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Gregorian leap rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Store time index for a calendar date.
pub fn time_index(date: NaiveDate) -> i64 {
    let year = date.year();
    let day_of_year = i64::from(date.ordinal0());
    i64::from(year) * days_in_year(year) + day_of_year
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| ClimateError::InvalidDate(format!("{}: {}", s, e)))
}

/// Same month and day, different year.
///
/// Fails for 29 February when `year` is not a leap year.
pub fn with_year(date: NaiveDate, year: i32) -> ClimateResult<NaiveDate> {
    date.with_year(year).ok_or_else(|| {
        ClimateError::InvalidDate(format!(
            "{} does not exist in year {}",
            date.format("%m-%d"),
            year
        ))
    })
}
