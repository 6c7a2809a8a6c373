//! # Reporting Windows
//!
//! Computes the half-open UTC windows the Reporting Aggregator sums over.
//!
//! ```text
//!   report_by_range("2024-01-01", "2024-01-03")
//!
//!   2024-01-01T00:00Z                                  2024-01-04T00:00Z
//!         [────────── Jan 1 ──────── Jan 2 ──────── Jan 3 ──────────)
//!       start (inclusive)                                 end (exclusive)
//! ```
//!
//! Dates must be `YYYY-MM-DD` exactly. Reading the clock is left to the
//! caller; [`ReportWindow::today`] takes `now` as an argument.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::REPORT_DATE_FORMAT;

/// A half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The full UTC day containing `now`.
    pub fn today(now: DateTime<Utc>) -> Self {
        let start = start_of_day(now.date_naive());
        ReportWindow {
            start,
            end: start + Duration::days(1),
        }
    }

    /// The window from the start of `start` through the end of `end`.
    ///
    /// ## Errors
    /// - `InvalidRange` when `end` precedes `start`
    /// - `InvalidFormat` when the end of `end` is not representable
    pub fn for_dates(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if end < start {
            return Err(ValidationError::InvalidRange {
                field: "date range".to_string(),
                start: start.format(REPORT_DATE_FORMAT).to_string(),
                end: end.format(REPORT_DATE_FORMAT).to_string(),
            });
        }

        let end = start_of_day(end)
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "end_date".to_string(),
                reason: "date is out of range".to_string(),
            })?;

        Ok(ReportWindow {
            start: start_of_day(start),
            end,
        })
    }

    /// Parses two `YYYY-MM-DD` strings into a window.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::ReportWindow;
    ///
    /// let window = ReportWindow::from_date_strings("2024-01-01", "2024-01-01").unwrap();
    /// assert_eq!(window.start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    /// assert_eq!(window.end.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    ///
    /// assert!(ReportWindow::from_date_strings("01-01-2024", "2024-01-01").is_err());
    /// ```
    pub fn from_date_strings(start: &str, end: &str) -> ValidationResult<Self> {
        let start = parse_report_date("start_date", start)?;
        let end = parse_report_date("end_date", end)?;
        Self::for_dates(start, end)
    }
}

/// Parses a calendar date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts unpadded fields (`2024-1-1`), so the shape is
/// checked first.
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("expected YYYY-MM-DD, got '{value}'"),
    };

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, REPORT_DATE_FORMAT).map_err(|_| invalid())
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_today_window() {
        let window = ReportWindow::today(utc("2024-03-15T17:45:12Z"));
        assert_eq!(window.start, utc("2024-03-15T00:00:00Z"));
        assert_eq!(window.end, utc("2024-03-16T00:00:00Z"));
    }

    #[test]
    fn test_single_day_range_is_inclusive_of_whole_day() {
        let window = ReportWindow::from_date_strings("2024-01-01", "2024-01-01").unwrap();

        assert_eq!(window.start, utc("2024-01-01T00:00:00Z"));
        assert_eq!(window.end, utc("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for bad in ["01-01-2024", "2024-1-1", "2024/01/01", "2024-01-01T00:00:00", "", "2024-02-30"] {
            let err = parse_report_date("start_date", bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = ReportWindow::from_date_strings("2024-01-05", "2024-01-01").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn test_leap_day() {
        let window = ReportWindow::from_date_strings("2024-02-29", "2024-02-29").unwrap();
        assert_eq!(window.end, utc("2024-03-01T00:00:00Z"));
    }
}
