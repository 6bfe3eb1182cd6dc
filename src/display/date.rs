//! Date conversion between form input and storage
//!
//! Forms use `DD/MM/YYYY`; stored records use ISO 8601 dates or timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Parse an ISO 8601 date or timestamp into its calendar date
///
/// Timestamps keep the calendar date of their own offset.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Split `DD/MM/YYYY` into numeric day, month and year
pub(crate) fn split_dmy(value: &str) -> Option<(u32, u32, i32)> {
    let mut parts = value.split('/');
    let day = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    let year = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month, year))
}

/// Format an ISO date or timestamp as `DD/MM/YYYY`
///
/// Returns an empty string when the input is not a date.
pub fn format_date_for_input(iso: &str) -> String {
    match parse_iso_date(iso) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// Convert `DD/MM/YYYY` to an ISO `YYYY-MM-DD` date
///
/// Rejects anything that is not a real calendar date between 1900 and 2100.
pub fn parse_date_from_input(value: &str) -> Option<String> {
    let (day, month, year) = split_dmy(value)?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(1900..=2100).contains(&year) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Portuguese month name for `month0` (0 = January)
pub fn month_name(month0: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month0 as usize).copied()
}

/// `Janeiro/2024` style label for a report period
pub fn format_month_year(month0: u32, year: i32) -> String {
    match month_name(month0) {
        Some(name) => format!("{}/{}", name, year),
        None => year.to_string(),
    }
}

/// `Janeiro/2024` style label for the month containing `date`
pub fn format_month_year_of(date: NaiveDate) -> String {
    format_month_year(date.month0(), date.year())
}
