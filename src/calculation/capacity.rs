//! Capacity evaluation.
//!
//! Answers "how many people are away on this day" and "would adding this
//! leave push any day over the concurrency cap". Only approved records
//! count against capacity. The result is advisory: whether to block or
//! merely warn is up to the caller.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CapacityPolicy, LeaveRecord};
use crate::store::LeaveStore;

/// Projected head count for one day of a candidate's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCapacity {
    /// The day.
    pub date: NaiveDate,
    /// Distinct employees away on that day if the candidate were added.
    pub count: usize,
}

/// Full outcome of a capacity check for a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityEvaluation {
    /// The candidate record's id.
    pub candidate_id: String,
    /// The candidate's employee.
    pub employee_id: String,
    /// Total headcount the threshold was derived from.
    pub headcount: usize,
    /// Maximum employees allowed away on one day.
    pub threshold: usize,
    /// Projected counts for every day of the candidate's range.
    pub days: Vec<DayCapacity>,
    /// Days where the projected count exceeds the threshold.
    pub days_over_capacity: Vec<NaiveDate>,
    /// Highest projected count over the range.
    pub peak: usize,
    /// True when any day exceeds the threshold.
    pub exceeds_capacity: bool,
}

/// Counts distinct employees with an approved record covering `day`.
///
/// An employee with several overlapping records is counted once.
pub fn concurrent_count(store: &LeaveStore, day: NaiveDate) -> usize {
    store
        .intersecting_day(day)
        .filter(|record| record.is_approved())
        .map(|record| record.employee_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Evaluates a candidate record against the capacity policy.
///
/// For each day of the candidate's range the candidate's employee is added
/// to the set of employees already away; a stored record with the
/// candidate's id is left out, since the candidate would replace it. The
/// candidate is validated exactly like [`LeaveStore::upsert`] would.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::evaluate_capacity;
/// use leave_engine::models::{CapacityPolicy, Employee, LeaveRecord, LeaveStatus, LeaveType, Role};
/// use leave_engine::store::LeaveStore;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employees = (1..=2)
///     .map(|n| Employee {
///         id: format!("emp_{n}"),
///         name: format!("Employee {n}"),
///         role: Role::Standard,
///         skills: vec![],
///         annual_allowance_days: None,
///     })
///     .collect();
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let leave = |id: &str, emp: &str| LeaveRecord {
///     id: id.to_string(),
///     employee_id: emp.to_string(),
///     start_date: d(10),
///     end_date: d(11),
///     leave_type: LeaveType::Standard,
///     note: None,
///     status: LeaveStatus::Approved,
/// };
///
/// let store = LeaveStore::from_parts(employees, vec![leave("a", "emp_1")])?;
/// let policy = CapacityPolicy::new(Decimal::from(50))?; // 1 of 2
///
/// let evaluation = evaluate_capacity(&store, &policy, &leave("b", "emp_2"))?;
/// assert_eq!(evaluation.threshold, 1);
/// assert_eq!(evaluation.peak, 2);
/// assert!(evaluation.exceeds_capacity);
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn evaluate_capacity(
    store: &LeaveStore,
    policy: &CapacityPolicy,
    candidate: &LeaveRecord,
) -> EngineResult<CapacityEvaluation> {
    candidate.validate()?;
    store
        .employee(&candidate.employee_id)
        .map_err(|_| EngineError::UnknownEmployee {
            record_id: candidate.id.clone(),
            employee_id: candidate.employee_id.clone(),
        })?;

    let headcount = store.headcount();
    let threshold = policy.threshold(headcount);

    let days: Vec<DayCapacity> = candidate
        .range()
        .days()
        .map(|date| {
            let mut away: HashSet<&str> = store
                .intersecting_day(date)
                .filter(|record| record.is_approved() && record.id != candidate.id)
                .map(|record| record.employee_id.as_str())
                .collect();
            away.insert(candidate.employee_id.as_str());
            DayCapacity {
                date,
                count: away.len(),
            }
        })
        .collect();

    let days_over_capacity: Vec<NaiveDate> = days
        .iter()
        .filter(|day| day.count > threshold)
        .map(|day| day.date)
        .collect();
    let peak = days.iter().map(|day| day.count).max().unwrap_or(0);

    Ok(CapacityEvaluation {
        candidate_id: candidate.id.clone(),
        employee_id: candidate.employee_id.clone(),
        headcount,
        threshold,
        exceeds_capacity: !days_over_capacity.is_empty(),
        days,
        days_over_capacity,
        peak,
    })
}

/// Returns true when adding `candidate` would push any day of its range
/// over the policy threshold.
pub fn would_exceed_capacity(
    store: &LeaveStore,
    policy: &CapacityPolicy,
    candidate: &LeaveRecord,
) -> EngineResult<bool> {
    evaluate_capacity(store, policy, candidate).map(|evaluation| evaluation.exceeds_capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, LeaveStatus, LeaveType, Role};
    use rust_decimal::Decimal;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn employees(count: usize) -> Vec<Employee> {
        (1..=count)
            .map(|n| Employee {
                id: format!("emp_{n:03}"),
                name: format!("Employee {n}"),
                role: Role::Standard,
                skills: vec![],
                annual_allowance_days: None,
            })
            .collect()
    }

    fn leave(id: &str, employee: usize, start: u32, end: u32) -> LeaveRecord {
        LeaveRecord {
            id: id.to_string(),
            employee_id: format!("emp_{employee:03}"),
            start_date: d(start),
            end_date: d(end),
            leave_type: LeaveType::Standard,
            note: None,
            status: LeaveStatus::Approved,
        }
    }

    fn thirty_percent() -> CapacityPolicy {
        CapacityPolicy::new(Decimal::from(30)).unwrap()
    }

    fn three_away_store() -> LeaveStore {
        LeaveStore::from_parts(
            employees(10),
            vec![
                leave("leave_001", 1, 10, 15),
                leave("leave_002", 2, 10, 15),
                leave("leave_003", 3, 10, 15),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_fourth_employee_exceeds_thirty_percent_of_ten() {
        let store = three_away_store();
        let candidate = leave("leave_004", 4, 12, 12);

        assert!(would_exceed_capacity(&store, &thirty_percent(), &candidate).unwrap());

        let evaluation = evaluate_capacity(&store, &thirty_percent(), &candidate).unwrap();
        assert_eq!(evaluation.threshold, 3);
        assert_eq!(evaluation.days, vec![DayCapacity { date: d(12), count: 4 }]);
        assert_eq!(evaluation.days_over_capacity, vec![d(12)]);
    }

    #[test]
    fn test_candidate_outside_busy_window_fits() {
        let store = three_away_store();
        let candidate = leave("leave_004", 4, 16, 20);
        assert!(!would_exceed_capacity(&store, &thirty_percent(), &candidate).unwrap());
    }

    #[test]
    fn test_partial_overlap_reports_only_busy_days() {
        let store = three_away_store();
        let candidate = leave("leave_004", 4, 14, 17);

        let evaluation = evaluate_capacity(&store, &thirty_percent(), &candidate).unwrap();
        assert!(evaluation.exceeds_capacity);
        assert_eq!(evaluation.days_over_capacity, vec![d(14), d(15)]);
        assert_eq!(evaluation.days.len(), 4);
        assert_eq!(evaluation.peak, 4);
    }

    #[test]
    fn test_employee_already_away_is_not_double_counted() {
        let store = three_away_store();
        // emp_001 already holds leave_001 on these days
        let candidate = leave("leave_004", 1, 11, 13);

        let evaluation = evaluate_capacity(&store, &thirty_percent(), &candidate).unwrap();
        assert_eq!(evaluation.peak, 3);
        assert!(!evaluation.exceeds_capacity);
    }

    #[test]
    fn test_candidate_replaces_record_with_same_id() {
        let store = three_away_store();
        // Moving leave_003 to a different employee does not add a fourth person
        let candidate = leave("leave_003", 4, 10, 15);

        let evaluation = evaluate_capacity(&store, &thirty_percent(), &candidate).unwrap();
        assert_eq!(evaluation.peak, 3);
        assert!(!evaluation.exceeds_capacity);
    }

    #[test]
    fn test_pending_and_rejected_records_do_not_count() {
        let mut store = three_away_store();
        let mut pending = leave("leave_010", 5, 12, 12);
        pending.status = LeaveStatus::Pending;
        let mut rejected = leave("leave_011", 6, 12, 12);
        rejected.status = LeaveStatus::Rejected;
        store.upsert(pending).unwrap();
        store.upsert(rejected).unwrap();

        assert_eq!(concurrent_count(&store, d(12)), 3);
    }

    #[test]
    fn test_concurrent_count_counts_distinct_employees() {
        let mut store = three_away_store();
        store.upsert(leave("leave_004", 1, 12, 13)).unwrap();

        assert_eq!(concurrent_count(&store, d(12)), 3);
        assert_eq!(concurrent_count(&store, d(9)), 0);
        assert_eq!(concurrent_count(&store, d(15)), 3);
    }

    #[test]
    fn test_minimum_threshold_of_one() {
        let store = LeaveStore::from_parts(employees(2), vec![leave("leave_001", 1, 1, 1)]).unwrap();
        let policy = CapacityPolicy::new(Decimal::from(10)).unwrap();

        let evaluation = evaluate_capacity(&store, &policy, &leave("leave_002", 2, 1, 1)).unwrap();
        assert_eq!(evaluation.threshold, 1);
        assert!(evaluation.exceeds_capacity);
    }

    #[test]
    fn test_rejects_invalid_candidate() {
        let store = three_away_store();

        let reversed = leave("leave_004", 4, 15, 12);
        assert!(matches!(
            evaluate_capacity(&store, &thirty_percent(), &reversed),
            Err(EngineError::InvalidDateRange { .. })
        ));

        let stranger = leave("leave_004", 99, 12, 12);
        assert!(matches!(
            would_exceed_capacity(&store, &thirty_percent(), &stranger),
            Err(EngineError::UnknownEmployee { .. })
        ));
    }
}
