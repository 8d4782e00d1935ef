//! Request types for the leave engine API.
//!
//! Leave records arrive with their dates as raw strings so that a bad date
//! is reported as `MALFORMED_DATE` rather than a generic JSON error.

use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Employee, LeaveRecord, LeaveStatus, LeaveType, parse_calendar_date};

/// A leave record as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecordRequest {
    /// Record id. Optional on `PUT /leave-records/:id`, where the path
    /// supplies it, and on capacity checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee this leave belongs to.
    pub employee_id: String,
    /// `YYYY-MM-DD` or an ISO 8601 timestamp.
    pub start_date: String,
    /// `YYYY-MM-DD` or an ISO 8601 timestamp.
    pub end_date: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Defaults to approved.
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveRecordRequest {
    /// Normalises the dates and builds a domain record, using `default_id`
    /// when the request carries no id.
    pub fn into_record(self, default_id: impl FnOnce() -> String) -> EngineResult<LeaveRecord> {
        Ok(LeaveRecord {
            id: self.id.unwrap_or_else(default_id),
            employee_id: self.employee_id,
            start_date: parse_calendar_date(&self.start_date)?,
            end_date: parse_calendar_date(&self.end_date)?,
            leave_type: self.leave_type,
            note: self.note,
            status: self.status,
        })
    }
}

impl TryFrom<LeaveRecordRequest> for LeaveRecord {
    type Error = crate::error::EngineError;

    fn try_from(req: LeaveRecordRequest) -> Result<Self, Self::Error> {
        req.into_record(String::new)
    }
}

/// Body of `PUT /sync`: the complete working set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncRequest {
    /// All employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// All leave records.
    #[serde(default)]
    pub records: Vec<LeaveRecordRequest>,
}

/// Query string of `GET /leave-records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    /// Only records of this employee.
    pub employee_id: Option<String>,
    /// Only records in this status (`pending`, `approved`, `rejected`).
    pub status: Option<String>,
}

/// Query string of `GET /overlaps`: either `day` or both `start` and `end`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverlapQuery {
    /// A single day.
    pub day: Option<String>,
    /// Window start (inclusive).
    pub start: Option<String>,
    /// Window end (inclusive).
    pub end: Option<String>,
}

/// Query string of `GET /employees/:id/balance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceQuery {
    /// Restrict the balance to one calendar year.
    pub year: Option<i32>,
}

/// Query string of `GET /employees/:id/upcoming`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingQuery {
    /// First day to consider; defaults to today.
    pub from: Option<String>,
    /// Maximum entries; defaults to [`DEFAULT_UPCOMING_LIMIT`].
    pub limit: Option<usize>,
}

/// Number of upcoming entries returned when no limit is given.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Parses a status filter value with the same rules as the JSON field.
pub fn parse_status(value: &str) -> Option<LeaveStatus> {
    let deserializer: StrDeserializer<'_, ValueError> = value.into_deserializer();
    LeaveStatus::deserialize(deserializer).ok()
}
