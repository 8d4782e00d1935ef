//! Leave balance calculation.
//!
//! Balances count business days (Monday to Friday) of approved standard
//! leave against the employee's yearly allowance. Illness, special leave
//! and training do not consume allowance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LeaveSettings;
use crate::error::EngineResult;
use crate::models::{DateRange, LeaveRecord, LeaveStatus, LeaveType};
use crate::store::LeaveStore;

/// An employee's leave balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee.
    pub employee_id: String,
    /// The year the balance was restricted to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Yearly allowance in business days.
    pub total_days: u32,
    /// Business days of approved standard leave.
    pub used_days: u64,
    /// `total_days - used_days`; negative when overdrawn.
    pub remaining_days: i64,
    /// Number of pending requests of any type.
    pub pending_requests: usize,
}

/// Computes an employee's balance.
///
/// With `year` set, only the business days that fall inside that calendar
/// year are counted, so leave spanning New Year is split between years.
///
/// Fails with `EmployeeNotFound` for an unknown employee.
pub fn leave_balance(
    store: &LeaveStore,
    settings: &LeaveSettings,
    employee_id: &str,
    year: Option<i32>,
) -> EngineResult<LeaveBalance> {
    let employee = store.employee(employee_id)?;
    let total_days = employee
        .annual_allowance_days
        .unwrap_or(settings.default_annual_allowance_days);

    let window = match year {
        Some(year) => DateRange::new(
            DateRange::month(year, 1)?.start,
            DateRange::month(year, 12)?.end,
        ),
        None => None,
    };

    let used_days: u64 = store
        .records_for(employee_id)
        .filter(|record| record.is_approved() && record.leave_type == LeaveType::Standard)
        .filter_map(|record| match window {
            Some(window) => clip(record, &window),
            None => Some(record.range()),
        })
        .map(|range| u64::from(range.business_days()))
        .sum();

    let pending_requests = store
        .records_for(employee_id)
        .filter(|record| record.status == LeaveStatus::Pending)
        .count();

    Ok(LeaveBalance {
        employee_id: employee_id.to_string(),
        year,
        total_days,
        used_days,
        remaining_days: i64::from(total_days)
            .saturating_sub(i64::try_from(used_days).unwrap_or(i64::MAX)),
        pending_requests,
    })
}

/// Approved leave for an employee starting on or after `from`, soonest
/// first, at most `limit` entries.
pub fn upcoming_leave(
    store: &LeaveStore,
    employee_id: &str,
    from: NaiveDate,
    limit: usize,
) -> EngineResult<Vec<LeaveRecord>> {
    store.employee(employee_id)?;

    let mut upcoming: Vec<&LeaveRecord> = store
        .records_for(employee_id)
        .filter(|record| record.is_approved() && record.start_date >= from)
        .collect();
    upcoming.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));

    Ok(upcoming.into_iter().take(limit).cloned().collect())
}

fn clip(record: &LeaveRecord, window: &DateRange) -> Option<DateRange> {
    DateRange::new(
        record.start_date.max(window.start),
        record.end_date.min(window.end),
    )
}
