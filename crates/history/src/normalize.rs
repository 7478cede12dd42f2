//! Canonical forms for the loosely typed fields of a service record.
//!
//! Records written by different app versions disagree on date order and on
//! how mileage is stored. Everything that compares or displays those fields
//! goes through this module.

use chrono::{Datelike, NaiveDate, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::Mileage;

static DAY_FIRST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").unwrap());
static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Rewrite `YYYY-MM-DD` as `DD-MM-YYYY`. `DD-MM-YYYY` and every unrecognized
/// shape (including the empty string) come back unchanged.
pub fn normalize_date(date: &str) -> String {
    if date.is_empty() || DAY_FIRST.is_match(date) {
        return date.to_string();
    }
    if YEAR_FIRST.is_match(date) {
        let (year, rest) = date.split_at(4);
        let month = &rest[1..3];
        let day = &rest[4..6];
        return format!("{day}-{month}-{year}");
    }
    date.to_string()
}

/// True for strings in the canonical `DD-MM-YYYY` shape. Says nothing about
/// whether the date exists.
pub fn is_day_first(date: &str) -> bool {
    DAY_FIRST.is_match(date)
}

/// Calendar date used for ordering.
///
/// The normalized string is read as `day-month-year`. Out-of-range parts roll
/// forward instead of being rejected: `31-04-2024` is 1 May 2024, month `13`
/// is January of the next year, day `00` is the last day of the previous
/// month. Anything that is not three integer groups yields `None`.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let normalized = normalize_date(date);
    let mut parts = normalized.split('-').map(|p| p.parse::<i64>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(day)), Some(Ok(month)), Some(Ok(year)), None) => rolled_date(year, month, day),
        _ => None,
    }
}

fn rolled_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let month0 = month.checked_sub(1)?;
    let year = i32::try_from(year.checked_add(month0.div_euclid(12))?).ok()?;
    let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

/// Strict check used by input validation: `DD-MM-YYYY` naming a real day.
pub fn is_real_date(date: &str) -> bool {
    if !is_day_first(date) {
        return false;
    }
    let day: u32 = date[0..2].parse().unwrap_or(0);
    let month: u32 = date[3..5].parse().unwrap_or(0);
    let year: i32 = date[6..10].parse().unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.day() == day && d.month() == month)
        .unwrap_or(false)
}

/// Integer mileage. Numbers pass through (fractions truncated); text keeps
/// only its decimal digits; anything else, or text without digits, is 0.
/// Values past `i64` saturate, whether they arrive as numbers or text.
pub fn normalize_mileage(mileage: &Mileage) -> i64 {
    match mileage {
        Mileage::Number(n) => *n,
        Mileage::Text(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                0
            } else {
                digits.parse().unwrap_or(i64::MAX)
            }
        }
        Mileage::Other(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Mileage::Other(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_date_rewrites_year_first() {
        assert_eq!(normalize_date("2025-10-01"), "01-10-2025");
        assert_eq!(normalize_date("01-10-2025"), "01-10-2025");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_normalize_date_leaves_unknown_shapes() {
        for s in ["1-10-2025", "2025/10/01", "01.10.2025", "20251001", " 2025-10-01", "2025-10-01 "] {
            assert_eq!(normalize_date(s), s);
        }
    }

    #[test]
    fn test_normalize_date_idempotent() {
        for s in ["2025-10-01", "01-10-2025", "1999-12-31", "31-02-2024", "", "garbage"] {
            let once = normalize_date(s);
            assert_eq!(normalize_date(&once), once);
        }
    }

    #[test]
    fn test_parse_date_both_shapes_agree() {
        let expected = NaiveDate::from_ymd_opt(2023, 12, 31);
        assert_eq!(parse_date("31-12-2023"), expected);
        assert_eq!(parse_date("2023-12-31"), expected);
    }

    #[test]
    fn test_parse_date_rolls_forward() {
        assert_eq!(parse_date("31-02-2024"), NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(parse_date("31-04-2023"), NaiveDate::from_ymd_opt(2023, 5, 1));
        assert_eq!(parse_date("01-13-2023"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date("00-03-2024"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("15-00-2024"), NaiveDate::from_ymd_opt(2023, 12, 15));
    }

    #[test]
    fn test_parse_date_unparseable() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("01-10"), None);
        assert_eq!(parse_date("01-10-2025-01"), None);
    }

    #[test]
    fn test_is_real_date() {
        assert!(is_real_date("29-02-2024"));
        assert!(!is_real_date("29-02-2023"));
        assert!(!is_real_date("31-04-2024"));
        assert!(!is_real_date("00-01-2024"));
        assert!(!is_real_date("2024-01-01"));
        assert!(!is_real_date(""));
    }

    #[test]
    fn test_normalize_mileage() {
        assert_eq!(normalize_mileage(&Mileage::from("12 345 km")), 12345);
        assert_eq!(normalize_mileage(&Mileage::from("1,200")), 1200);
        assert_eq!(normalize_mileage(&Mileage::from("")), 0);
        assert_eq!(normalize_mileage(&Mileage::from("km")), 0);
        assert_eq!(normalize_mileage(&Mileage::Number(500)), 500);
        assert_eq!(normalize_mileage(&Mileage::Other(json!(812.9))), 812);
        assert_eq!(normalize_mileage(&Mileage::Other(json!(null))), 0);
        assert_eq!(normalize_mileage(&Mileage::Other(json!([1, 2]))), 0);
    }

    #[test]
    fn test_normalize_mileage_overflow_saturates() {
        assert_eq!(normalize_mileage(&Mileage::from("99999999999999999999999")), i64::MAX);
        assert_eq!(normalize_mileage(&Mileage::Other(json!(18446744073709551615u64))), i64::MAX);
        assert_eq!(normalize_mileage(&Mileage::Other(json!(1e30))), i64::MAX);
    }

    #[test]
    fn test_normalize_mileage_idempotent() {
        for m in [Mileage::from("12 345 km"), Mileage::Number(42), Mileage::from(""), Mileage::default()] {
            let once = normalize_mileage(&m);
            assert_eq!(normalize_mileage(&Mileage::Number(once)), once);
        }
    }
}
