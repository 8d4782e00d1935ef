//! Core data models for the leave engine.
//!
//! This module contains all the domain models used throughout the engine.

mod capacity_policy;
mod date;
mod employee;
mod leave_record;

pub use capacity_policy::{CapacityPolicy, DEFAULT_MAX_CONCURRENT_PERCENTAGE};
pub use date::{DateRange, deserialize_calendar_date, parse_calendar_date};
pub use employee::{Employee, MAX_SKILL_RATING, MIN_SKILL_RATING, Role, Skill};
pub use leave_record::{LeaveRecord, LeaveStatus, LeaveType, MAX_RECORD_DAYS};
