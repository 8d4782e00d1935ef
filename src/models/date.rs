//! Calendar date normalisation and inclusive date ranges.
//!
//! Dates arrive both as plain `YYYY-MM-DD` strings and as full timestamps.
//! Every date entering the engine goes through [`parse_calendar_date`] so
//! that comparisons always happen on a canonical [`NaiveDate`].

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Normalises a date or timestamp string to its calendar date.
///
/// Timestamps collapse to the date as written; offsets are not applied.
/// Years outside 1..=9999 are rejected.
///
/// # Example
///
/// ```
/// use leave_engine::models::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
/// assert_eq!(parse_calendar_date("2025-06-10").unwrap(), expected);
/// assert_eq!(parse_calendar_date("2025-06-10T00:00:00Z").unwrap(), expected);
/// assert_eq!(parse_calendar_date("2025-06-10T23:30:00+02:00").unwrap(), expected);
/// assert!(parse_calendar_date("10/06/2025").is_err());
/// ```
pub fn parse_calendar_date(value: &str) -> EngineResult<NaiveDate> {
    parse_any(value.trim())
        .filter(|date| (1..=9999).contains(&date.year()))
        .ok_or_else(|| EngineError::MalformedDate {
            value: value.to_string(),
        })
}

fn parse_any(trimmed: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|datetime| datetime.date())
}

/// Serde adapter that accepts any form understood by [`parse_calendar_date`].
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let range = DateRange::new(d(10), d(15)).unwrap();
///
/// assert!(range.contains(d(10)));
/// assert!(range.contains(d(15)));
/// assert!(!range.contains(d(16)));
/// assert_eq!(range.days().count(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning `None` when `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The range covering every day of a calendar month.
    ///
    /// Fails with [`EngineError::InvalidPeriod`] for a month outside 1..=12
    /// or a year chrono cannot represent.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod {
            message: format!("{year}-{month:02} is not a valid month"),
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    /// Returns true when `day` lies within the range, boundaries included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Standard interval-overlap test against another inclusive range.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of calendar days in the range.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Number of Monday-to-Friday days in the range.
    ///
    /// ```
    /// use leave_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// // 2025-06-09 is a Monday, 2025-06-15 a Sunday
    /// let week = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(week.business_days(), 5);
    /// ```
    pub fn business_days(&self) -> u32 {
        self.days()
            .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32
    }
}
