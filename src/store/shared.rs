//! Copy-on-write sharing of a [`LeaveStore`] between concurrent callers.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::EngineResult;
use crate::models::{Employee, LeaveRecord};

use super::LeaveStore;

/// A [`LeaveStore`] shared across threads by snapshot swapping.
///
/// Readers grab an `Arc` to the current snapshot and query it without
/// holding any lock. Writers are serialised; each applies its change to a
/// private copy and publishes it only if the change succeeded, so a reader
/// sees either the whole mutation or none of it.
///
/// # Example
///
/// ```
/// use leave_engine::store::{LeaveStore, SharedLeaveStore};
///
/// let shared = SharedLeaveStore::new(LeaveStore::new());
/// let before = shared.snapshot();
/// shared.remove("leave_001");
/// assert_eq!(before.record_count(), shared.snapshot().record_count());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedLeaveStore {
    current: Arc<RwLock<Arc<LeaveStore>>>,
    writer: Arc<Mutex<()>>,
}

impl SharedLeaveStore {
    /// Wraps an initial store.
    pub fn new(store: LeaveStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// The current consistent snapshot.
    pub fn snapshot(&self) -> Arc<LeaveStore> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies `change` to a copy of the current store and publishes the
    /// copy if `change` succeeds.
    pub fn mutate<T, F>(&self, change: F) -> EngineResult<T>
    where
        F: FnOnce(&mut LeaveStore) -> EngineResult<T>,
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = LeaveStore::clone(&self.snapshot());
        let output = change(&mut next)?;

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
        Ok(output)
    }

    /// See [`LeaveStore::load`].
    pub fn load(&self, employees: Vec<Employee>, records: Vec<LeaveRecord>) -> EngineResult<()> {
        self.mutate(|store| store.load(employees, records))
    }

    /// See [`LeaveStore::upsert`].
    pub fn upsert(&self, record: LeaveRecord) -> EngineResult<Option<LeaveRecord>> {
        self.mutate(|store| store.upsert(record))
    }

    /// See [`LeaveStore::remove`].
    pub fn remove(&self, id: &str) -> Option<LeaveRecord> {
        let snapshot = self.snapshot();
        if snapshot.get(id).is_err() {
            return None;
        }
        self.mutate(|store| Ok(store.remove(id))).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{LeaveStatus, LeaveType, Role};
    use chrono::NaiveDate;
    use std::thread;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            role: Role::Standard,
            skills: vec![],
            annual_allowance_days: None,
        }
    }

    fn record(id: &str, day: u32) -> LeaveRecord {
        LeaveRecord {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            leave_type: LeaveType::Illness,
            note: None,
            status: LeaveStatus::Approved,
        }
    }

    fn shared_with_employee() -> SharedLeaveStore {
        let shared = SharedLeaveStore::default();
        shared.load(vec![employee("emp_001")], vec![]).unwrap();
        shared
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutations() {
        let shared = shared_with_employee();
        let before = shared.snapshot();

        shared.upsert(record("leave_001", 3)).unwrap();

        assert_eq!(before.record_count(), 0);
        assert_eq!(shared.snapshot().record_count(), 1);
    }

    #[test]
    fn test_failed_mutation_publishes_nothing() {
        let shared = shared_with_employee();
        shared.upsert(record("leave_001", 3)).unwrap();

        let mut bad = record("leave_002", 4);
        bad.employee_id = "emp_404".to_string();
        assert!(matches!(
            shared.upsert(bad),
            Err(EngineError::UnknownEmployee { .. })
        ));

        assert_eq!(shared.snapshot().record_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let shared = shared_with_employee();
        let before = shared.snapshot();
        assert!(shared.remove("leave_404").is_none());
        assert!(Arc::ptr_eq(&before, &shared.snapshot()));
    }

    #[test]
    fn test_concurrent_upserts_are_all_applied() {
        let shared = shared_with_employee();

        let handles: Vec<_> = (1..=20)
            .map(|day| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.upsert(record(&format!("leave_{day:03}"), day)).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.record_count(), 20);
        assert_eq!(snapshot.index().len(), 20);
    }
}
