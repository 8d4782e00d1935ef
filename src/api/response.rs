//! Response types for the leave engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the small bodies that are not domain types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CapacityEvaluation;
use crate::error::EngineError;
use crate::models::LeaveRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::UnknownEmployee { employee_id, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_EMPLOYEE",
                    message,
                    format!("No employee with id '{}' is known to the engine", employee_id),
                ),
            ),
            EngineError::InvalidDateRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DATE_RANGE", message),
            ),
            EngineError::MalformedDate { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("MALFORMED_DATE", message),
            ),
            EngineError::InvalidRecord { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::DuplicateId { .. }
            | EngineError::InvalidPolicy { .. }
            | EngineError::InvalidPeriod { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Employees in the working set.
    pub employees: usize,
    /// Leave records in the working set.
    pub records: usize,
}

/// Body of `PUT /sync`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Employees loaded.
    pub employees: usize,
    /// Leave records loaded.
    pub records: usize,
}

/// Body of `PUT /leave-records/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResponse {
    /// The stored record.
    pub record: LeaveRecord,
    /// The record it replaced, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<LeaveRecord>,
}

/// Body of `GET /capacity/:day`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayCapacityResponse {
    /// The day.
    pub date: NaiveDate,
    /// Distinct employees on approved leave.
    pub count: usize,
    /// Total headcount.
    pub headcount: usize,
    /// Maximum employees allowed away.
    pub threshold: usize,
    /// `count > threshold`.
    pub over_capacity: bool,
}

/// Body of `POST /capacity/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityCheckResponse {
    /// The capacity evaluation.
    pub evaluation: CapacityEvaluation,
    /// The employee's own pending or approved records overlapping the candidate.
    pub conflicts: Vec<LeaveRecord>,
}

/// Body of `GET /settings` and `PUT /settings/capacity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Current concurrency cap in percent.
    pub max_concurrent_percentage: Decimal,
    /// Total headcount.
    pub headcount: usize,
    /// Threshold derived from the two.
    pub threshold: usize,
    /// Whether reports include pending records.
    pub include_pending: bool,
    /// Allowance for employees without their own.
    pub default_annual_allowance_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let cases = [
            (
                EngineError::UnknownEmployee {
                    record_id: "leave_001".to_string(),
                    employee_id: "emp_404".to_string(),
                },
                "UNKNOWN_EMPLOYEE",
            ),
            (
                EngineError::InvalidDateRange {
                    record_id: "leave_001".to_string(),
                    start: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                    end: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
                },
                "INVALID_DATE_RANGE",
            ),
            (
                EngineError::MalformedDate {
                    value: "yesterday".to_string(),
                },
                "MALFORMED_DATE",
            ),
            (
                EngineError::DuplicateId {
                    kind: "employee".to_string(),
                    id: "emp_001".to_string(),
                },
                "VALIDATION_ERROR",
            ),
        ];

        for (engine_error, code) in cases {
            let response: ApiErrorResponse = engine_error.into();
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let response: ApiErrorResponse = EngineError::RecordNotFound {
            id: "leave_404".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "RECORD_NOT_FOUND");
        assert_eq!(response.error.message, "Leave record not found: leave_404");

        let response: ApiErrorResponse = EngineError::EmployeeNotFound {
            id: "emp_404".to_string(),
        }
        .into();
        assert_eq!(response.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/nowhere".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
