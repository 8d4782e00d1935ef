//! Per-employee overlap detection.
//!
//! The data model allows an employee to hold overlapping records, so this
//! is a query rather than a constraint. Callers decide whether a conflict
//! blocks a request.

use crate::models::LeaveRecord;
use crate::store::LeaveStore;

/// The candidate employee's own pending or approved records that overlap
/// the candidate's range.
///
/// A stored record with the candidate's id is skipped, so re-checking an
/// existing record does not report it against itself. Results are ordered
/// by start date.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::employee_conflicts;
/// use leave_engine::models::{Employee, LeaveRecord, LeaveStatus, LeaveType, Role};
/// use leave_engine::store::LeaveStore;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let leave = |id: &str, start, end| LeaveRecord {
///     id: id.to_string(),
///     employee_id: "emp_001".to_string(),
///     start_date: d(start),
///     end_date: d(end),
///     leave_type: LeaveType::Standard,
///     note: None,
///     status: LeaveStatus::Pending,
/// };
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Anna Schmidt".to_string(),
///     role: Role::Standard,
///     skills: vec![],
///     annual_allowance_days: None,
/// };
///
/// let store = LeaveStore::from_parts(vec![employee], vec![leave("a", 10, 12)])?;
/// let conflicts = employee_conflicts(&store, &leave("b", 12, 14));
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].id, "a");
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn employee_conflicts<'a>(store: &'a LeaveStore, candidate: &LeaveRecord) -> Vec<&'a LeaveRecord> {
    let window = candidate.range();
    let mut conflicts: Vec<&LeaveRecord> = store
        .all()
        .filter(|record| {
            record.employee_id == candidate.employee_id
                && record.id != candidate.id
                && record.is_active()
                && record.range().overlaps(&window)
        })
        .collect();
    conflicts.sort_by(|a, b| (a.start_date, &a.id).cmp(&(b.start_date, &b.id)));
    conflicts
}
