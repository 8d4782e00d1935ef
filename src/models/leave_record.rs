//! Leave record model and related types.
//!
//! This module defines [`LeaveRecord`] along with the [`LeaveType`] tag and
//! the [`LeaveStatus`] lifecycle used by the request flow.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::{DateRange, deserialize_calendar_date};
use crate::error::{EngineError, EngineResult};

/// The kind of absence a leave record represents.
///
/// The four known tags are closed variants; anything else is preserved in
/// [`LeaveType::Other`] so that new tags from the collaborator pass through.
///
/// # Example
///
/// ```
/// use leave_engine::models::LeaveType;
///
/// assert_eq!(LeaveType::from("illness".to_string()), LeaveType::Illness);
/// assert_eq!(LeaveType::from("krankheit".to_string()), LeaveType::Illness);
/// assert_eq!(
///     LeaveType::from("parental".to_string()),
///     LeaveType::Other("parental".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeaveType {
    /// Regular paid vacation.
    Standard,
    /// Sick leave.
    Illness,
    /// Special leave (weddings, bereavement, moving).
    Special,
    /// Training or further education.
    Training,
    /// A tag this engine does not know about.
    Other(String),
}

impl LeaveType {
    /// The canonical tag string.
    pub fn as_str(&self) -> &str {
        match self {
            LeaveType::Standard => "standard",
            LeaveType::Illness => "illness",
            LeaveType::Special => "special",
            LeaveType::Training => "training",
            LeaveType::Other(tag) => tag,
        }
    }
}

impl From<String> for LeaveType {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "standard" | "vacation" | "urlaub" => LeaveType::Standard,
            "illness" | "sick" | "krankheit" => LeaveType::Illness,
            "special" | "special_leave" | "sonderurlaub" => LeaveType::Special,
            "training" | "fortbildung" | "schulung" => LeaveType::Training,
            _ => LeaveType::Other(tag),
        }
    }
}

impl From<LeaveType> for String {
    fn from(leave_type: LeaveType) -> Self {
        match leave_type {
            LeaveType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a leave request.
///
/// Entries created directly on the calendar carry no status and are
/// treated as approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Granted; counts against capacity.
    #[default]
    Approved,
    /// Declined; ignored by capacity and calendar aggregates.
    Rejected,
}

/// Longest leave record accepted, in calendar days.
pub const MAX_RECORD_DAYS: i64 = 731;

/// A single leave entry for one employee over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee this leave belongs to.
    pub employee_id: String,
    /// First day of leave (inclusive).
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub end_date: NaiveDate,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Request lifecycle status.
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Validates the record's own fields (not its employee reference).
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidRecord {
                record_id: self.id.clone(),
                message: "id must not be empty".to_string(),
            });
        }

        if self.end_date < self.start_date {
            return Err(EngineError::InvalidDateRange {
                record_id: self.id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }

        let days = self.range().len_days();
        if days > MAX_RECORD_DAYS {
            return Err(EngineError::InvalidRecord {
                record_id: self.id.clone(),
                message: format!("covers {days} days, more than the limit of {MAX_RECORD_DAYS}"),
            });
        }

        Ok(())
    }

    /// The inclusive range covered by this record.
    ///
    /// Only meaningful for validated records; a reversed record yields a
    /// range ending on its start date.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
            .unwrap_or_else(|| DateRange::single(self.start_date))
    }

    /// Returns true when `day` falls within the record.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Returns true when the record is approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Returns true for pending or approved records.
    pub fn is_active(&self) -> bool {
        self.status != LeaveStatus::Rejected
    }
}
