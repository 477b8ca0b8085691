//! Parsing and formatting of the ISO-8601 timestamps that the backend sends.
//!
//! Timestamps arrive in a handful of shapes: a bare `2024-03-05`, a local date-time such as
//! `2024-03-05T10:20:30.1234567`, or an RFC 3339 value with `Z` or an offset. In every case the
//! wall-clock date and time as written is what we keep; offsets are not converted.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Display, Formatter};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Returned when a string is not a timestamp we understand. Carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateError {
    input: String,
}

impl DateError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unable to parse '{}' as an ISO-8601 date", self.input)
    }
}

impl std::error::Error for DateError {}

/// Parses `s` into a date-time.
pub fn parse_iso(s: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| DateError {
            input: s.to_string(),
        })
}

/// Formats `s` as a zero-padded `DD-MM-YYYY`.
pub fn format_display(s: &str) -> Result<String, DateError> {
    Ok(parse_iso(s)?.format(DISPLAY_FORMAT).to_string())
}

/// Returns the zero-based month of `s`, so January is `0` and December is `11`.
pub fn month_index_of(s: &str) -> Result<usize, DateError> {
    Ok(parse_iso(s)?.month0() as usize)
}

/// Checks whether the calendar date of `s` lies in `[start, end]`.
///
/// The range only constrains anything when both ends are present. If either is `None` this
/// returns `Ok(true)` without looking at `s`.
pub fn in_range(
    s: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<bool, DateError> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let date = parse_iso(s)?.date();
            Ok(start <= date && date <= end)
        }
        _ => Ok(true),
    }
}

/// An optional, inclusive range of calendar dates as picked in a date-range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range that lets everything through.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// True when both ends are set, i.e. when the range actually filters.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, s: &str) -> Result<bool, DateError> {
        in_range(s, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_iso("2024-03-05").unwrap();
        assert_eq!(dt.date(), date(2024, 3, 5));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_local_date_time_with_fraction() {
        let dt = parse_iso("2024-07-19T14:03:27.4766667").unwrap();
        assert_eq!(dt.date(), date(2024, 7, 19));
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_without_seconds() {
        let dt = parse_iso("2024-07-19T14:03").unwrap();
        assert_eq!(dt.minute(), 3);
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let dt = parse_iso("2024-12-31T23:30:00+05:30").unwrap();
        assert_eq!(dt.date(), date(2024, 12, 31));
        let dt = parse_iso("2024-01-01T00:15:00Z").unwrap();
        assert_eq!(dt.date(), date(2024, 1, 1));
    }

    #[test]
    fn test_parse_failure_carries_input() {
        let err = parse_iso("yesterday").unwrap_err();
        assert_eq!(err.input(), "yesterday");
        assert!(parse_iso("").is_err());
        assert!(parse_iso("2024-13-01").is_err());
        assert!(parse_iso("2024-02-30").is_err());
    }

    #[test]
    fn test_format_display_zero_pads() {
        assert_eq!(format_display("2024-03-05").unwrap(), "05-03-2024");
        assert_eq!(
            format_display("2023-11-09T08:00:00").unwrap(),
            "09-11-2023"
        );
        assert!(format_display("not a date").is_err());
    }

    #[test]
    fn test_month_index_of() {
        assert_eq!(month_index_of("2024-01-10").unwrap(), 0);
        assert_eq!(month_index_of("2024-03-05").unwrap(), 2);
        assert_eq!(month_index_of("2022-12-31T23:59:59").unwrap(), 11);
        assert!(month_index_of("03/05/2024").is_err());
    }

    #[test]
    fn test_in_range_inclusive_bounds() {
        let start = Some(date(2024, 3, 1));
        let end = Some(date(2024, 3, 31));
        assert!(in_range("2024-03-01", start, end).unwrap());
        assert!(in_range("2024-03-31T23:59:59", start, end).unwrap());
        assert!(!in_range("2024-04-01", start, end).unwrap());
        assert!(!in_range("2024-02-29T12:00:00", start, end).unwrap());
    }

    #[test]
    fn test_in_range_partial_bounds_skip_check() {
        assert!(in_range("2020-01-01", Some(date(2024, 1, 1)), None).unwrap());
        assert!(in_range("2030-01-01", None, Some(date(2024, 1, 1))).unwrap());
        assert!(in_range("garbage", None, None).unwrap());
    }

    #[test]
    fn test_in_range_propagates_parse_failure() {
        let result = in_range("garbage", Some(date(2024, 1, 1)), Some(date(2024, 2, 1)));
        assert!(result.is_err());
    }

    #[test]
    fn test_date_range() {
        assert!(!DateRange::unbounded().is_bounded());
        assert!(!DateRange::new(Some(date(2024, 1, 1)), None).is_bounded());
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.is_bounded());
        assert!(range.contains("2024-01-15").unwrap());
        assert!(!range.contains("2024-02-15").unwrap());
    }
}
