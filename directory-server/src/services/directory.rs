//! Employee Directory
//!
//! Owns identifier assignment and the uniqueness / existence checks around
//! create and update. The other services read through [`EmployeeDirectory`]
//! rather than the store directly.

use std::collections::HashSet;
use std::sync::Arc;

use shared::models::Employee;
use uuid::Uuid;

use super::error::{DirectoryError, DirectoryResult};
use super::retry_on_conflict;
use crate::db::{RecordStore, Versioned, WriteExpectation};

#[derive(Clone)]
pub struct EmployeeDirectory {
    store: Arc<dyn RecordStore>,
}

impl EmployeeDirectory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Create a new employee under a freshly generated identifier
    ///
    /// Any identifier on the payload is only used for the duplicate check and
    /// then replaced. Every direct report must already exist. History starts
    /// empty; entries are only added through the compensation service.
    pub fn create(&self, mut employee: Employee) -> DirectoryResult<Employee> {
        tracing::debug!(employee = %employee, "Creating employee");

        if !employee.has_blank_id() && self.store.find_by_id(&employee.employee_id)?.is_some() {
            return Err(DirectoryError::IdentifierAlreadyExists(format!(
                "User \"{}\" already exists. Employee ID must be unique",
                employee.employee_id
            )));
        }

        if employee.has_direct_reports() {
            let wanted = employee.distinct_direct_reports();
            let found: HashSet<String> = self
                .store
                .find_all_by_id(&wanted)?
                .into_iter()
                .map(|record| record.value.employee_id)
                .collect();

            let missing: Vec<&str> = wanted
                .iter()
                .map(String::as_str)
                .filter(|id| !found.contains(*id))
                .collect();
            if !missing.is_empty() {
                return Err(DirectoryError::EmployeeNotFound(format!(
                    "Employee IDs [{}] were not found while creating {}",
                    missing.join(", "),
                    employee
                )));
            }
        }

        employee.employee_id = Uuid::new_v4().to_string();
        employee.compensation.clear();
        let saved = self.store.upsert(employee, WriteExpectation::Absent)?;

        crate::audit_log!("create", saved.value.employee_id);
        Ok(saved.into_inner())
    }

    /// Point lookup; an unknown identifier is `Ok(None)`
    pub fn read(&self, id: &str) -> DirectoryResult<Option<Employee>> {
        tracing::debug!(employee_id = %id, "Reading employee");
        Ok(self.store.find_by_id(id)?.map(Versioned::into_inner))
    }

    /// Replace the scalar fields of the record at `id`
    ///
    /// The payload identifier must be non-blank and match the record already
    /// stored at `id`, ignoring case. Direct reports and compensation history
    /// are kept from the stored record. An empty slot accepts the write and
    /// starts with neither.
    pub fn update(&self, id: &str, employee: Employee) -> DirectoryResult<Employee> {
        tracing::debug!(employee_id = %id, employee = %employee, "Updating employee");

        if employee.has_blank_id() {
            return Err(DirectoryError::IdentifierNotSpecified);
        }

        let saved = retry_on_conflict(id, || {
            let current = self.store.find_by_id(id)?;
            if let Some(existing) = &current
                && !same_identifier(&existing.value.employee_id, &employee.employee_id)
            {
                return Err(DirectoryError::IdentifierAlreadyExists(format!(
                    "Unable to update Employee ID to {id}. Unable to change employee ID from {} to {id}. New ID already exists.",
                    employee.employee_id
                )));
            }

            let (mut replacement, expectation) = match current {
                Some(record) => (record.value, WriteExpectation::Version(record.version)),
                None => (Employee::default().with_id(id), WriteExpectation::Absent),
            };
            replacement.apply_profile(&employee);
            Ok(self.store.upsert(replacement, expectation)?)
        })?;

        crate::audit_log!("update", saved.value.employee_id);
        Ok(saved.into_inner())
    }

    /// Look up an employee that must exist
    pub fn resolve(&self, id: &str) -> DirectoryResult<Versioned<Employee>> {
        if id.trim().is_empty() {
            return Err(DirectoryError::IdentifierNotSpecified);
        }
        self.store.find_by_id(id)?.ok_or_else(|| {
            DirectoryError::EmployeeNotFound(format!(
                "Employee for employee ID {id} does not exist."
            ))
        })
    }

    /// Write back a record previously obtained from [`resolve`](Self::resolve)
    pub(crate) fn save(&self, employee: Employee, version: u64) -> DirectoryResult<Employee> {
        let saved = self
            .store
            .upsert(employee, WriteExpectation::Version(version))?;
        Ok(saved.into_inner())
    }

    /// Number of stored employees
    pub fn count(&self) -> DirectoryResult<usize> {
        Ok(self.store.count()?)
    }
}

fn same_identifier(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CompensationHistory;
    use crate::services::test_support::{RacingStore, memory_store, put};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::Compensation;
    use std::sync::atomic::Ordering;

    fn employee(first: &str) -> Employee {
        Employee::new(first, "Tester", "Developer", "Engineering")
    }

    fn comp(salary: i64, date: &str) -> Compensation {
        Compensation::new(
            Decimal::from(salary),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    fn directory() -> (EmployeeDirectory, Arc<crate::db::RedbRecordStore>) {
        let store = memory_store();
        (EmployeeDirectory::new(store.clone()), store)
    }

    #[test]
    fn test_create_assigns_identifier() {
        let (directory, _) = directory();

        let first = directory.create(employee("Ada")).unwrap();
        let second = directory.create(employee("Ada")).unwrap();

        assert!(!first.has_blank_id());
        assert!(!second.has_blank_id());
        assert_ne!(first.employee_id, second.employee_id);
        assert!(first.same_profile(&employee("Ada")));
        assert_eq!(directory.count().unwrap(), 2);
    }

    #[test]
    fn test_create_overwrites_unused_client_identifier() {
        let (directory, store) = directory();

        let created = directory.create(employee("Ada").with_id("chosen")).unwrap();
        assert_ne!(created.employee_id, "chosen");
        assert!(store.find_by_id("chosen").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_existing_identifier() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Ada").with_id("taken"));

        let err = directory
            .create(employee("Grace").with_id("taken"))
            .unwrap_err();
        match err {
            DirectoryError::IdentifierAlreadyExists(msg) => {
                assert_eq!(msg, "User \"taken\" already exists. Employee ID must be unique");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(directory.count().unwrap(), 1);
    }

    #[test]
    fn test_create_lists_every_missing_report() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Paul").with_id("b7839309"));

        let payload =
            employee("John").with_direct_reports(["x-1", "b7839309", "x-2", "x-1"]);
        let err = directory.create(payload).unwrap_err();

        match err {
            DirectoryError::EmployeeNotFound(msg) => {
                assert!(msg.starts_with("Employee IDs [x-1, x-2] were not found while creating"));
                assert!(msg.contains("John Tester"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(directory.count().unwrap(), 1);
    }

    #[test]
    fn test_create_with_known_reports() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Paul").with_id("p"));
        put(store.as_ref(), employee("Ringo").with_id("r"));

        let created = directory
            .create(employee("John").with_direct_reports(["p", "r"]))
            .unwrap();
        assert_eq!(created.direct_reports, vec!["p", "r"]);

        let stored = directory.read(&created.employee_id).unwrap().unwrap();
        assert_eq!(stored.direct_reports, vec!["p", "r"]);
    }

    #[test]
    fn test_create_discards_client_history() {
        let (directory, store) = directory();

        let payload = employee("Ada").with_compensation(vec![comp(1, "2020-01-01")]);
        let created = directory.create(payload).unwrap();
        assert!(created.compensation.is_empty());

        let stored = store.find_by_id(&created.employee_id).unwrap().unwrap();
        assert!(stored.value.compensation.is_empty());
    }

    #[test]
    fn test_read_unknown_is_none() {
        let (directory, _) = directory();
        assert!(directory.read("nope").unwrap().is_none());
        assert!(directory.read("").unwrap().is_none());
    }

    #[test]
    fn test_update_requires_identifier() {
        let (directory, _) = directory();
        let err = directory.update("e-1", employee("Ada").with_id("  ")).unwrap_err();
        assert!(matches!(err, DirectoryError::IdentifierNotSpecified));
    }

    #[test]
    fn test_update_replaces_fields() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Ada").with_id("e-1"));

        let mut changed = employee("Ada");
        changed.position = "Architect".into();
        let saved = directory.update("e-1", changed.with_id("E-1")).unwrap();

        assert_eq!(saved.employee_id, "e-1");
        assert_eq!(saved.position, "Architect");
        let stored = store.find_by_id("e-1").unwrap().unwrap();
        assert_eq!(stored.value.position, "Architect");
        assert_eq!(stored.version, 2);
    }

    #[test]
    fn test_update_keeps_history_and_reports() {
        let (directory, store) = directory();
        let history = vec![comp(1, "2020-01-01"), comp(5, "2021-01-01")];
        put(
            store.as_ref(),
            employee("Ada")
                .with_id("e-1")
                .with_direct_reports(["e-2"])
                .with_compensation(history.clone()),
        );

        // payload carries no history, then a conflicting one
        let mut changed = employee("Ada").with_id("e-1");
        changed.position = "Architect".into();
        let saved = directory.update("e-1", changed.clone()).unwrap();
        assert_eq!(saved.position, "Architect");
        assert_eq!(saved.compensation, history);
        assert_eq!(saved.direct_reports, vec!["e-2"]);

        let rewritten =
            changed.with_compensation(vec![comp(9, "2020-01-01"), comp(9, "2020-01-01")]);
        let saved = directory.update("e-1", rewritten).unwrap();
        assert_eq!(saved.compensation, history);
        assert_eq!(
            store.find_by_id("e-1").unwrap().unwrap().value.compensation,
            history
        );
    }

    #[test]
    fn test_backdated_append_rejected_after_update() {
        let (directory, store) = directory();
        put(
            store.as_ref(),
            employee("Ada")
                .with_id("e-1")
                .with_compensation(vec![comp(1, "2020-01-01"), comp(5, "2021-01-01")]),
        );
        let history = CompensationHistory::new(directory.clone());

        directory.update("e-1", employee("Ada").with_id("e-1")).unwrap();

        let err = history
            .add_compensation("e-1", comp(10, "2019-01-01"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::CompensationInPast(_)));
        assert_eq!(
            store.find_by_id("e-1").unwrap().unwrap().value.compensation.len(),
            2
        );
    }

    #[test]
    fn test_update_rejects_identifier_change() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Ada").with_id("e-1"));

        let err = directory
            .update("e-1", employee("Ada").with_id("e-2"))
            .unwrap_err();
        match err {
            DirectoryError::IdentifierAlreadyExists(msg) => {
                assert_eq!(
                    msg,
                    "Unable to update Employee ID to e-1. Unable to change employee ID from e-2 to e-1. New ID already exists."
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_update_into_empty_slot() {
        let (directory, store) = directory();

        let saved = directory
            .update("fresh", employee("Ada").with_id("elsewhere"))
            .unwrap();
        assert_eq!(saved.employee_id, "fresh");
        assert!(saved.same_profile(&employee("Ada")));
        assert!(store.find_by_id("fresh").unwrap().is_some());
        assert!(store.find_by_id("elsewhere").unwrap().is_none());
    }

    #[test]
    fn test_update_retries_lost_race() {
        let inner = crate::db::RedbRecordStore::open_in_memory().unwrap();
        put(&inner, employee("Ada").with_id("e-1"));
        let store = Arc::new(RacingStore::new(inner, 1, |mut e: Employee| {
            e.department = "Research".into();
            e
        }));
        let directory = EmployeeDirectory::new(store.clone());

        let saved = directory
            .update("e-1", employee("Ada").with_id("e-1"))
            .unwrap();
        assert_eq!(saved.department, "Engineering");
        // first write lost the race, second succeeded
        assert_eq!(store.upserts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_update_gives_up_after_repeated_conflicts() {
        let inner = crate::db::RedbRecordStore::open_in_memory().unwrap();
        put(&inner, employee("Ada").with_id("e-1"));
        let store = Arc::new(RacingStore::new(inner, usize::MAX, |e: Employee| e));
        let directory = EmployeeDirectory::new(store.clone());

        let err = directory
            .update("e-1", employee("Ada").with_id("e-1"))
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::ConcurrentModification { attempts: 3, .. }
        ));
        assert_eq!(store.upserts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_resolve() {
        let (directory, store) = directory();
        put(store.as_ref(), employee("Ada").with_id("e-1"));

        assert_eq!(directory.resolve("e-1").unwrap().version, 1);
        assert!(matches!(
            directory.resolve(" ").unwrap_err(),
            DirectoryError::IdentifierNotSpecified
        ));
        match directory.resolve("ghost").unwrap_err() {
            DirectoryError::EmployeeNotFound(msg) => {
                assert_eq!(msg, "Employee for employee ID ghost does not exist.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
