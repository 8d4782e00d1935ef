//! Property tests for the store, overlap index and capacity counting.
//!
//! Every indexed query is checked against a brute-force scan of all
//! records.

use std::collections::{BTreeSet, HashSet};

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use leave_engine::calculation::concurrent_count;
use leave_engine::models::{Employee, LeaveRecord, LeaveStatus, LeaveType, Role};
use leave_engine::store::LeaveStore;

const EMPLOYEES: usize = 6;
const HORIZON: u64 = 60;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base() + Days::new(offset)
}

fn employees() -> Vec<Employee> {
    (0..EMPLOYEES)
        .map(|n| Employee {
            id: format!("emp_{n}"),
            name: format!("Employee {n}"),
            role: Role::Standard,
            skills: vec![],
            annual_allowance_days: None,
        })
        .collect()
}

fn status_strategy() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Pending),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
    ]
}

/// (employee, start offset, length, status)
fn record_parts() -> impl Strategy<Value = (usize, u64, u64, LeaveStatus)> {
    (0..EMPLOYEES, 0..HORIZON, 0u64..10, status_strategy())
}

fn build_record(n: usize, (employee, start, len, status): (usize, u64, u64, LeaveStatus)) -> LeaveRecord {
    LeaveRecord {
        id: format!("leave_{n:03}"),
        employee_id: format!("emp_{employee}"),
        start_date: day(start),
        end_date: day(start + len),
        leave_type: LeaveType::Standard,
        note: None,
        status,
    }
}

fn records_strategy() -> impl Strategy<Value = Vec<LeaveRecord>> {
    prop::collection::vec(record_parts(), 0..40).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(n, part)| build_record(n, part))
            .collect()
    })
}

fn store_with(records: &[LeaveRecord]) -> LeaveStore {
    LeaveStore::from_parts(employees(), records.to_vec()).unwrap()
}

fn id_set<'a>(records: impl Iterator<Item = &'a LeaveRecord>) -> BTreeSet<String> {
    records.map(|r| r.id.clone()).collect()
}

proptest! {
    #[test]
    fn day_query_matches_brute_force(records in records_strategy(), target in 0..HORIZON + 12) {
        let store = store_with(&records);
        let target = day(target);

        let expected = id_set(records.iter().filter(|r| r.start_date <= target && target <= r.end_date));
        prop_assert_eq!(id_set(store.intersecting_day(target)), expected);
    }

    #[test]
    fn single_day_range_equals_day_query(records in records_strategy(), target in 0..HORIZON + 12) {
        let store = store_with(&records);
        let target = day(target);

        prop_assert_eq!(
            id_set(store.intersecting_range(target, target)),
            id_set(store.intersecting_day(target))
        );
    }

    #[test]
    fn range_query_matches_brute_force(
        records in records_strategy(),
        from in 0..HORIZON + 12,
        len in 0u64..20,
    ) {
        let store = store_with(&records);
        let (start, end) = (day(from), day(from + len));

        let expected = id_set(records.iter().filter(|r| r.start_date <= end && r.end_date >= start));
        prop_assert_eq!(id_set(store.intersecting_range(start, end)), expected);
    }

    #[test]
    fn day_query_is_ordered_by_start(records in records_strategy(), target in 0..HORIZON) {
        let store = store_with(&records);
        let starts: Vec<NaiveDate> = store.intersecting_day(day(target)).map(|r| r.start_date).collect();

        prop_assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn concurrent_count_counts_each_employee_once(records in records_strategy(), target in 0..HORIZON) {
        let store = store_with(&records);
        let target = day(target);

        let expected: HashSet<&str> = records
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved && r.start_date <= target && target <= r.end_date)
            .map(|r| r.employee_id.as_str())
            .collect();

        let count = concurrent_count(&store, target);
        prop_assert_eq!(count, expected.len());
        prop_assert!(count <= store.headcount());
    }

    #[test]
    fn adding_approved_leave_never_lowers_the_count(
        records in records_strategy(),
        extra in record_parts(),
        target in 0..HORIZON,
    ) {
        let mut store = store_with(&records);
        let target = day(target);
        let before = concurrent_count(&store, target);

        let (employee, start, len, _) = extra;
        store.upsert(build_record(999, (employee, start, len, LeaveStatus::Approved))).unwrap();

        prop_assert!(concurrent_count(&store, target) >= before);
    }

    #[test]
    fn upsert_then_get_round_trips(records in records_strategy(), extra in record_parts()) {
        let mut store = store_with(&records);
        let record = build_record(999, extra);

        store.upsert(record.clone()).unwrap();
        prop_assert_eq!(store.get(&record.id).unwrap(), &record);
        prop_assert_eq!(store.record_count(), records.len() + 1);
    }

    #[test]
    fn remove_drops_record_from_every_query(records in records_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!records.is_empty());
        let mut store = store_with(&records);
        let victim = &records[pick.index(records.len())];

        prop_assert!(store.remove(&victim.id).is_some());
        prop_assert!(store.get(&victim.id).is_err());
        prop_assert!(store.intersecting_day(victim.start_date).all(|r| r.id != victim.id));
    }
}
