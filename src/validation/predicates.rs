//! Primitive validation predicates
//!
//! Every predicate is total: malformed or missing input is simply invalid.
//! Numeric text is parsed once, at the boundary, by [`parse_number`].

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::display::date::{parse_iso_date, split_dmy};
use crate::models::PERCENTAGE_TOLERANCE;

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Longest leading decimal literal, as typed into a numeric field.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap());

/// Parse the leading number of a text field
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"10.5kg"`
/// gives `10.5`. Returns `None` when the text does not start with a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let matched = LEADING_NUMBER.find(text)?;
    matched.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Present and not just whitespace
pub fn is_not_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Present and strictly greater than zero
pub fn is_positive_number(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

/// Present and zero or greater
pub fn is_non_negative_number(value: Option<f64>) -> bool {
    value.is_some_and(|v| v >= 0.0)
}

/// Matches the `DD/MM/YYYY` digit layout without checking ranges
pub fn is_valid_date_format(value: &str) -> bool {
    DATE_FORMAT.is_match(value)
}

/// A `DD/MM/YYYY` string naming a real calendar date
///
/// Years before 100 are rejected; form input never means the first century.
pub fn is_valid_date(value: &str) -> bool {
    if !is_valid_date_format(value) {
        return false;
    }
    split_dmy(value)
        .filter(|&(_, _, year)| year >= 100)
        .and_then(|(day, month, year)| NaiveDate::from_ymd_opt(year, month, day))
        .is_some()
}

/// The date (`DD/MM/YYYY` or ISO) is today or later, in local time
pub fn is_date_not_in_past(value: &str) -> bool {
    is_date_not_in_past_on(value, Local::now().date_naive())
}

/// The date (`DD/MM/YYYY` or ISO) is `today` or later
///
/// Unparseable input and impossible dates are never "not in the past".
pub fn is_date_not_in_past_on(value: &str, today: NaiveDate) -> bool {
    let date = if value.contains('/') {
        split_dmy(value).and_then(|(day, month, year)| NaiveDate::from_ymd_opt(year, month, day))
    } else {
        parse_iso_date(value)
    };
    date.is_some_and(|d| d >= today)
}

/// Percentages are non-empty and sum to 100 within 0.01
pub fn is_valid_percentage_distribution(percentages: &[f64]) -> bool {
    is_valid_percentage_distribution_with(percentages, PERCENTAGE_TOLERANCE)
}

/// Percentages are non-empty and sum to 100 within `tolerance` (absolute)
pub fn is_valid_percentage_distribution_with(percentages: &[f64], tolerance: f64) -> bool {
    if percentages.is_empty() {
        return false;
    }
    let sum: f64 = percentages.iter().sum();
    (sum - 100.0).abs() < tolerance
}

/// Loosely `local@domain.tld`, with no whitespace
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// At least `min` characters once surrounding whitespace is trimmed
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// At most `max` characters, surrounding whitespace included
pub fn has_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// `min <= value <= max`
pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}
