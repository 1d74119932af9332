/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A value that looked like a date when it came from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateLike {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl DateLike {
    /// Position on the time line, dates at midnight.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            DateLike::Date(d) => d.and_hms_opt(0, 0, 0).unwrap_or_default(),
            DateLike::DateTime(dt) => *dt,
        }
    }

    pub fn format(&self) -> String {
        match self {
            DateLike::Date(d) => format_date(d),
            DateLike::DateTime(dt) => format_datetime(dt),
        }
    }
}

/// Recognizes ISO dates ("2024-03-15"), naive date-times and RFC 3339
/// timestamps. The wall-clock time of the string is kept as is.
pub fn parse_date_like(value: &str) -> Option<DateLike> {
    let value = value.trim();
    // cheapest rejection first: every accepted form starts with YYYY-MM-DD
    if value.len() < 10 || value.as_bytes().get(4) != Some(&b'-') {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(DateLike::DateTime(dt.naive_local()));
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(DateLike::DateTime(dt));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(DateLike::Date)
}

/// Format datetime to DD.MM.YYYY HH:MM:SS
/// Example: 2024-03-15T14:02:26.123 -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Format date to DD.MM.YYYY
pub fn format_date(value: &NaiveDate) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Reformats an ISO string for display, returning the input when it is not a date.
pub fn format_iso(value: &str) -> String {
    parse_date_like(value)
        .map(|d| d.format())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_iso("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02:26");
        assert_eq!(format_iso("2024-12-31T23:59:59+03:00"), "31.12.2024 23:59:59");
        assert_eq!(format_iso("2024-12-31 08:00:00"), "31.12.2024 08:00:00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_iso("2024-03-15"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_iso("invalid"), "invalid");
        assert_eq!(parse_date_like("2024"), None);
        assert_eq!(parse_date_like("CP-2024-03-15"), None);
        assert_eq!(parse_date_like("2024-13-45"), None);
    }

    #[test]
    fn test_instant_orders_dates_and_datetimes() {
        let date = parse_date_like("2024-03-15").unwrap();
        let later = parse_date_like("2024-03-15T00:00:01").unwrap();
        assert!(date.instant() < later.instant());
    }
}
