//! Calendar aggregation reports.
//!
//! Day, month and year summaries for calendar rendering. Reports are pure
//! functions of a store snapshot. Rejected records are always excluded;
//! pending records are included when [`ReportSettings::include_pending`]
//! is set.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ReportSettings;
use crate::error::EngineResult;
use crate::models::{DateRange, LeaveRecord, LeaveStatus, LeaveType};
use crate::store::LeaveStore;

/// Records on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    /// The day.
    pub date: NaiveDate,
    /// Number of records covering the day.
    pub count: usize,
    /// The records, ordered by start date.
    pub records: Vec<LeaveRecord>,
}

/// Record count for one day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    /// The day.
    pub date: NaiveDate,
    /// Number of records covering the day.
    pub count: usize,
}

/// Summary of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// One entry per day of the month, in order.
    pub days: Vec<DayCount>,
    /// Records touching the month, by leave type.
    pub by_type: BTreeMap<LeaveType, usize>,
    /// Distinct employees with at least one record in the month.
    pub distinct_employees: usize,
    /// Records touching the month.
    pub total_records: usize,
}

/// Twelve month reports for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReport {
    /// Calendar year.
    pub year: i32,
    /// January through December.
    pub months: Vec<MonthReport>,
    /// Distinct employees with at least one record in the year.
    pub distinct_employees: usize,
}

fn visible(settings: &ReportSettings, record: &LeaveRecord) -> bool {
    match record.status {
        LeaveStatus::Approved => true,
        LeaveStatus::Pending => settings.include_pending,
        LeaveStatus::Rejected => false,
    }
}

/// Builds the report for a single day.
pub fn day_report(store: &LeaveStore, settings: &ReportSettings, day: NaiveDate) -> DayReport {
    let records: Vec<LeaveRecord> = store
        .intersecting_day(day)
        .filter(|record| visible(settings, record))
        .cloned()
        .collect();

    DayReport {
        date: day,
        count: records.len(),
        records,
    }
}

/// Builds the report for a calendar month.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::month_report;
/// use leave_engine::config::ReportSettings;
/// use leave_engine::models::{Employee, LeaveRecord, LeaveStatus, LeaveType, Role};
/// use leave_engine::store::LeaveStore;
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Anna Schmidt".to_string(),
///     role: Role::Standard,
///     skills: vec![],
///     annual_allowance_days: None,
/// };
/// let record = LeaveRecord {
///     id: "leave_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
///     leave_type: LeaveType::Illness,
///     note: None,
///     status: LeaveStatus::Approved,
/// };
/// let store = LeaveStore::from_parts(vec![employee], vec![record])?;
///
/// let report = month_report(&store, &ReportSettings::default(), 2025, 6)?;
/// let counts: Vec<usize> = report.days.iter().map(|d| d.count).take(5).collect();
/// assert_eq!(counts, vec![1, 1, 1, 0, 0]);
/// assert_eq!(report.by_type.get(&LeaveType::Illness), Some(&1));
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn month_report(
    store: &LeaveStore,
    settings: &ReportSettings,
    year: i32,
    month: u32,
) -> EngineResult<MonthReport> {
    let range = DateRange::month(year, month)?;

    let records: Vec<&LeaveRecord> = store
        .intersecting_range(range.start, range.end)
        .filter(|record| visible(settings, record))
        .collect();

    let days = range
        .days()
        .map(|date| DayCount {
            date,
            count: records.iter().filter(|record| record.covers(date)).count(),
        })
        .collect();

    let mut by_type = BTreeMap::new();
    for record in &records {
        *by_type.entry(record.leave_type.clone()).or_insert(0) += 1;
    }

    Ok(MonthReport {
        year,
        month,
        days,
        by_type,
        distinct_employees: LeaveStore::distinct_employees(records.iter().copied()),
        total_records: records.len(),
    })
}

/// Builds one month report per month of `year`.
pub fn year_report(store: &LeaveStore, settings: &ReportSettings, year: i32) -> EngineResult<YearReport> {
    let months = (1..=12)
        .map(|month| month_report(store, settings, year, month))
        .collect::<EngineResult<Vec<_>>>()?;

    let year_start = DateRange::month(year, 1)?.start;
    let year_end = DateRange::month(year, 12)?.end;
    let distinct_employees = store
        .intersecting_range(year_start, year_end)
        .filter(|record| visible(settings, record))
        .map(|record| record.employee_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    Ok(YearReport {
        year,
        months,
        distinct_employees,
    })
}
