//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Errors fall into three families: validation failures raised at the
//! ingestion boundary, lookups of identifiers that do not exist, and
//! configuration problems.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::RecordNotFound {
///     id: "leave_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Leave record not found: leave_001");
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave record was malformed in a way not covered by a more specific variant.
    #[error("Invalid leave record '{record_id}': {message}")]
    InvalidRecord {
        /// The ID of the invalid record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A leave record referenced an employee that is not in the working set.
    #[error("Leave record '{record_id}' references unknown employee '{employee_id}'")]
    UnknownEmployee {
        /// The ID of the offending record.
        record_id: String,
        /// The employee ID that could not be resolved.
        employee_id: String,
    },

    /// A leave record ended before it started.
    #[error("Leave record '{record_id}' ends ({end}) before it starts ({start})")]
    InvalidDateRange {
        /// The ID of the offending record.
        record_id: String,
        /// The start date supplied.
        start: NaiveDate,
        /// The end date supplied.
        end: NaiveDate,
    },

    /// A date value could not be normalised to a calendar date.
    #[error("Malformed date '{value}': expected YYYY-MM-DD or an ISO 8601 timestamp")]
    MalformedDate {
        /// The raw value that failed to parse.
        value: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The same identifier appeared twice in a bulk load.
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId {
        /// What kind of entity was duplicated ("employee" or "leave record").
        kind: String,
        /// The duplicated identifier.
        id: String,
    },

    /// The capacity policy was out of range.
    #[error("Invalid capacity policy: {message}")]
    InvalidPolicy {
        /// A description of the problem.
        message: String,
    },

    /// A requested reporting period does not exist (e.g. month 13).
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of the problem.
        message: String,
    },

    /// No leave record exists with the given identifier.
    #[error("Leave record not found: {id}")]
    RecordNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by malformed input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidRecord { .. }
                | EngineError::UnknownEmployee { .. }
                | EngineError::InvalidDateRange { .. }
                | EngineError::MalformedDate { .. }
                | EngineError::InvalidEmployee { .. }
                | EngineError::DuplicateId { .. }
                | EngineError::InvalidPolicy { .. }
                | EngineError::InvalidPeriod { .. }
        )
    }

    /// Returns true for lookups of identifiers that do not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::RecordNotFound { .. } | EngineError::EmployeeNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_unknown_employee_displays_both_ids() {
        let error = EngineError::UnknownEmployee {
            record_id: "leave_001".to_string(),
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Leave record 'leave_001' references unknown employee 'emp_404'"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_dates() {
        let error = EngineError::InvalidDateRange {
            record_id: "leave_001".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Leave record 'leave_001' ends (2025-06-09) before it starts (2025-06-10)"
        );
    }

    #[test]
    fn test_malformed_date_displays_value() {
        let error = EngineError::MalformedDate {
            value: "10/06/2025".to_string(),
        };
        assert!(error.to_string().contains("'10/06/2025'"));
    }

    #[test]
    fn test_validation_classification() {
        let validation = [
            EngineError::MalformedDate {
                value: "x".to_string(),
            },
            EngineError::DuplicateId {
                kind: "employee".to_string(),
                id: "emp_001".to_string(),
            },
            EngineError::InvalidPeriod {
                message: "month 13".to_string(),
            },
        ];
        for error in &validation {
            assert!(error.is_validation(), "{error} should be a validation error");
            assert!(!error.is_not_found());
        }
    }

    #[test]
    fn test_not_found_classification() {
        let error = EngineError::EmployeeNotFound {
            id: "emp_404".to_string(),
        };
        assert!(error.is_not_found());
        assert!(!error.is_validation());
    }

    #[test]
    fn test_config_errors_are_neither_family() {
        let error = EngineError::ConfigParseError {
            path: "/config/settings.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert!(!error.is_validation());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::RecordNotFound {
                id: "leave_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
