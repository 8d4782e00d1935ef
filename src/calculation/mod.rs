//! Calculation logic for the leave engine.
//!
//! This module contains the queries built on top of the store: capacity
//! evaluation against the concurrency cap, calendar aggregation reports,
//! leave balances and per-employee conflict detection.

mod balance;
mod capacity;
mod conflicts;
mod reports;

pub use balance::{LeaveBalance, leave_balance, upcoming_leave};
pub use capacity::{
    CapacityEvaluation, DayCapacity, concurrent_count, evaluate_capacity, would_exceed_capacity,
};
pub use conflicts::employee_conflicts;
pub use reports::{DayCount, DayReport, MonthReport, YearReport, day_report, month_report, year_report};
