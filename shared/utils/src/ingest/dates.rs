//! Expiration Date Parser
//!
//! Normalizes the date representations found in WMS exports into a
//! calendar date. Recognized forms, tried in order:
//!
//! 1. `D/M/YYYY` (day first)
//! 2. `D-M-YYYY` (day first)
//! 3. `YYYY-M-D`, optionally followed by a time after a space or `T`
//! 4. Spreadsheet serial number in the open interval (0, 50000)
//!
//! Anything else, including calendar-invalid values such as `32/01/2024`,
//! is reported as `None`.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Cell values that mean "no date" in exported sheets.
const NULL_SENTINELS: [&str; 5] = ["", "NULL", "null", "NaN", "Invalid Date"];

/// Exclusive upper bound for spreadsheet serial dates.
const MAX_SERIAL: f64 = 50_000.0;

static DAY_FIRST_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid date pattern"));
static DAY_FIRST_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").expect("valid date pattern"));
static YEAR_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}").expect("valid date pattern"));

/// Origin of spreadsheet serial dates (serial 1 is 1899-12-31).
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Parse an expiration date cell. Never fails loudly: unrecognized input
/// yields `None`.
pub fn parse_expiration_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if NULL_SENTINELS.contains(&value) {
        return None;
    }

    let parsed = if DAY_FIRST_SLASH.is_match(value) {
        parse_day_first(value, '/')
    } else if DAY_FIRST_DASH.is_match(value) {
        parse_day_first(value, '-')
    } else if YEAR_FIRST.is_match(value) {
        parse_year_first(value)
    } else {
        None
    };

    match parsed.or_else(|| parse_serial(value)) {
        Some(date) => {
            debug!(raw = value, date = %date, "Parsed expiration date");
            Some(date)
        }
        None => {
            warn!(raw = value, "Unrecognized expiration date");
            None
        }
    }
}

fn parse_day_first(value: &str, separator: char) -> Option<NaiveDate> {
    let [day, month, year] = split_numbers(value, separator)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn parse_year_first(value: &str) -> Option<NaiveDate> {
    let date_part = value.split([' ', 'T']).next()?;
    let [year, month, day] = split_numbers(date_part, '-')?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn split_numbers(value: &str, separator: char) -> Option<[u32; 3]> {
    let mut parts = value.split(separator).map(|part| part.parse::<u32>().ok());
    let first = parts.next()??;
    let second = parts.next()??;
    let third = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

/// Whole days after the serial epoch; a fractional day (time of day) is dropped.
fn parse_serial(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.parse().ok()?;
    if !(serial > 0.0 && serial < MAX_SERIAL) {
        return None;
    }
    serial_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(parse_expiration_date("15/03/2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_expiration_date("5/3/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_expiration_date("05-03-2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_expiration_date("  01/12/2025 "), Some(date(2025, 12, 1)));
    }

    #[test]
    fn test_year_first_format_discards_time() {
        assert_eq!(parse_expiration_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_expiration_date("2024-3-5 00:00:00"), Some(date(2024, 3, 5)));
        assert_eq!(parse_expiration_date("2024-03-15T10:30:00"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_calendar_invalid_dates() {
        assert_eq!(parse_expiration_date("32/01/2024"), None);
        assert_eq!(parse_expiration_date("29/02/2023"), None);
        assert_eq!(parse_expiration_date("2024-13-01"), None);
        assert_eq!(parse_expiration_date("00/01/2024"), None);
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(parse_expiration_date("1"), Some(date(1899, 12, 31)));
        assert_eq!(parse_expiration_date("45000"), Some(date(2023, 3, 15)));
        assert_eq!(parse_expiration_date("45000.75"), Some(date(2023, 3, 15)));
        assert_eq!(parse_expiration_date("0"), None);
        assert_eq!(parse_expiration_date("50000"), None);
        assert_eq!(parse_expiration_date("-3"), None);
    }

    #[test]
    fn test_sentinels_and_garbage() {
        for value in ["", "NULL", "null", "NaN", "Invalid Date", "   "] {
            assert_eq!(parse_expiration_date(value), None, "value {:?}", value);
        }
        assert_eq!(parse_expiration_date("next week"), None);
        assert_eq!(parse_expiration_date("15/03/24"), None);
        assert_eq!(parse_expiration_date("inf"), None);
    }

    proptest! {
        /// Any calendar-valid DD/MM/YYYY string parses to exactly that date.
        #[test]
        fn prop_day_first_round_trip(
            year in 1900i32..2200,
            month in 1u32..=12,
            day in 1u32..=31,
        ) {
            let text = format!("{:02}/{:02}/{}", day, month, year);
            let expected = NaiveDate::from_ymd_opt(year, month, day);
            prop_assert_eq!(parse_expiration_date(&text), expected);
        }

        #[test]
        fn prop_serial_offsets_from_epoch(serial in 1i64..50_000) {
            let parsed = parse_expiration_date(&serial.to_string());
            prop_assert_eq!(parsed, Some(serial_epoch() + Duration::days(serial)));
        }
    }
}
