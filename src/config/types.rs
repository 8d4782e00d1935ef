//! Configuration types for the leave engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::{CapacityPolicy, Employee, LeaveRecord};

/// Default yearly allowance for employees without their own value.
pub const DEFAULT_ANNUAL_ALLOWANCE_DAYS: u32 = 30;

/// Settings controlling calendar aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Whether pending requests appear in day/month/year reports alongside
    /// approved ones. Rejected records never appear.
    #[serde(default = "default_include_pending")]
    pub include_pending: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            include_pending: default_include_pending(),
        }
    }
}

fn default_include_pending() -> bool {
    true
}

/// Settings for leave balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSettings {
    /// Allowance used when an employee has no `annual_allowance_days`.
    #[serde(default = "default_allowance")]
    pub default_annual_allowance_days: u32,
}

impl Default for LeaveSettings {
    fn default() -> Self {
        Self {
            default_annual_allowance_days: DEFAULT_ANNUAL_ALLOWANCE_DAYS,
        }
    }
}

fn default_allowance() -> u32 {
    DEFAULT_ANNUAL_ALLOWANCE_DAYS
}

/// The complete engine configuration, as stored in `settings.yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Concurrency cap.
    #[serde(default)]
    pub capacity: CapacityPolicy,
    /// Calendar aggregate settings.
    #[serde(default)]
    pub reports: ReportSettings,
    /// Leave balance settings.
    #[serde(default)]
    pub leave: LeaveSettings,
}

/// An initial working set, typically exported from the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// All employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// All leave records.
    #[serde(default)]
    pub records: Vec<LeaveRecord>,
}
