//! The leave record store.
//!
//! [`LeaveStore`] owns the canonical employees and leave records for a
//! session together with the derived [`OverlapIndex`]. Every mutation
//! validates its input first and rebuilds the index afterwards, so a store
//! value is always internally consistent. [`SharedLeaveStore`] wraps it for
//! hosts that query and mutate concurrently.

mod shared;

pub use shared::SharedLeaveStore;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::index::OverlapIndex;
use crate::models::{Employee, LeaveRecord};

/// In-memory working set of employees and leave records.
///
/// # Example
///
/// ```
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
///     start_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
///     leave_type: LeaveType::Standard,
///     note: None,
///     status: LeaveStatus::Approved,
/// };
///
/// let mut store = LeaveStore::new();
/// store.load(vec![employee], vec![record.clone()])?;
/// assert_eq!(store.get("leave_001")?, &record);
///
/// store.remove("leave_001");
/// assert!(store.get("leave_001").is_err());
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeaveStore {
    employees: HashMap<String, Employee>,
    records: HashMap<String, LeaveRecord>,
    index: OverlapIndex,
}

impl LeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given working set.
    pub fn from_parts(employees: Vec<Employee>, records: Vec<LeaveRecord>) -> EngineResult<Self> {
        let mut store = Self::new();
        store.load(employees, records)?;
        Ok(store)
    }

    /// Replaces the entire working set.
    ///
    /// Fails without touching the current state if any employee is invalid,
    /// any identifier is duplicated, any record references an unknown
    /// employee, or any record ends before it starts.
    pub fn load(&mut self, employees: Vec<Employee>, records: Vec<LeaveRecord>) -> EngineResult<()> {
        let mut next_employees = HashMap::with_capacity(employees.len());
        for employee in employees {
            employee.validate()?;
            if next_employees.contains_key(&employee.id) {
                return Err(EngineError::DuplicateId {
                    kind: "employee".to_string(),
                    id: employee.id,
                });
            }
            next_employees.insert(employee.id.clone(), employee);
        }

        let mut next_records = HashMap::with_capacity(records.len());
        for record in records {
            validate_record(&next_employees, &record)?;
            if next_records.contains_key(&record.id) {
                return Err(EngineError::DuplicateId {
                    kind: "leave record".to_string(),
                    id: record.id,
                });
            }
            next_records.insert(record.id.clone(), record);
        }

        self.employees = next_employees;
        self.records = next_records;
        self.reindex();

        debug!(
            employees = self.employees.len(),
            records = self.records.len(),
            "Loaded working set"
        );
        Ok(())
    }

    /// Inserts a record or replaces the one with the same id.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, record: LeaveRecord) -> EngineResult<Option<LeaveRecord>> {
        validate_record(&self.employees, &record)?;

        let record_id = record.id.clone();
        let previous = self.records.insert(record_id.clone(), record);
        self.reindex();

        debug!(
            record_id = %record_id,
            replaced = previous.is_some(),
            records = self.records.len(),
            "Upserted leave record"
        );
        Ok(previous)
    }

    /// Removes a record by id. Absence is not an error.
    pub fn remove(&mut self, id: &str) -> Option<LeaveRecord> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            self.reindex();
        }

        debug!(
            record_id = %id,
            removed = removed.is_some(),
            records = self.records.len(),
            "Removed leave record"
        );
        removed
    }

    /// Iterates the current records in no particular order.
    ///
    /// Each call starts a fresh iteration over the same snapshot.
    pub fn all(&self) -> impl Iterator<Item = &LeaveRecord> {
        self.records.values()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> EngineResult<&LeaveRecord> {
        self.records
            .get(id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Iterates all employees in no particular order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Total number of employees.
    pub fn headcount(&self) -> usize {
        self.employees.len()
    }

    /// Total number of leave records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Records belonging to one employee.
    pub fn records_for<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a LeaveRecord> {
        self.records
            .values()
            .filter(move |record| record.employee_id == employee_id)
    }

    /// Records covering `day`, ordered by start date.
    pub fn intersecting_day(&self, day: NaiveDate) -> impl Iterator<Item = &LeaveRecord> {
        self.index
            .intersecting_day(day)
            .filter_map(move |id| self.records.get(id))
    }

    /// Records overlapping the inclusive window, ordered by start date.
    pub fn intersecting_range(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> impl Iterator<Item = &LeaveRecord> {
        self.index
            .intersecting_range(range_start, range_end)
            .filter_map(move |id| self.records.get(id))
    }

    /// The derived overlap index for the current records.
    pub fn index(&self) -> &OverlapIndex {
        &self.index
    }

    /// Number of distinct employees among the given records.
    pub fn distinct_employees<'a, I>(records: I) -> usize
    where
        I: IntoIterator<Item = &'a LeaveRecord>,
    {
        records
            .into_iter()
            .map(|record| record.employee_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    fn reindex(&mut self) {
        self.index = OverlapIndex::build(self.records.values());
    }
}

fn validate_record(employees: &HashMap<String, Employee>, record: &LeaveRecord) -> EngineResult<()> {
    record.validate()?;

    if !employees.contains_key(&record.employee_id) {
        return Err(EngineError::UnknownEmployee {
            record_id: record.id.clone(),
            employee_id: record.employee_id.clone(),
        });
    }

    Ok(())
}
