//! Reporting Structure Calculator
//!
//! Counts everyone who reports to an employee, directly or through any
//! chain of managers. The hierarchy is walked breadth-first over identifiers
//! with a visited set, so cycles terminate and an employee reachable along
//! two paths is counted once.
//!
//! Reads are independent of each other. A concurrent update during a walk
//! may produce a count that mixes old and new state.

use std::collections::{HashSet, VecDeque};

use shared::models::ReportingStructure;

use super::directory::EmployeeDirectory;
use super::error::DirectoryResult;

#[derive(Clone)]
pub struct ReportingStructureCalculator {
    directory: EmployeeDirectory,
}

impl ReportingStructureCalculator {
    pub fn new(directory: EmployeeDirectory) -> Self {
        Self { directory }
    }

    /// Resolve `id` and count its transitive reports
    ///
    /// A blank or unknown identifier yields [`ReportingStructure::empty`].
    pub fn find_reporting_structure(&self, id: &str) -> DirectoryResult<ReportingStructure> {
        if id.trim().is_empty() {
            return Ok(ReportingStructure::empty());
        }
        let Some(root) = self.directory.read(id)? else {
            tracing::debug!(employee_id = %id, "No employee for reporting structure");
            return Ok(ReportingStructure::empty());
        };
        if !root.has_direct_reports() {
            return Ok(ReportingStructure::new(root, 0));
        }

        let mut visited: HashSet<String> = HashSet::from([root.employee_id.clone()]);
        let mut frontier: VecDeque<String> = VecDeque::new();
        let mut count = 0usize;

        for report in root.distinct_direct_reports() {
            if visited.insert(report.clone()) {
                frontier.push_back(report);
                count += 1;
            }
        }

        while let Some(next) = frontier.pop_front() {
            // An identifier that no longer resolves still counts but has no reports
            let Some(employee) = self.directory.read(&next)? else {
                tracing::warn!(employee_id = %next, manager = %id, "Direct report missing from store");
                continue;
            };
            for report in employee.direct_reports {
                if visited.insert(report.clone()) {
                    frontier.push_back(report);
                    count += 1;
                }
            }
        }

        tracing::debug!(employee_id = %id, number_of_reports = count, "Computed reporting structure");
        Ok(ReportingStructure::new(root, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{RecordStore, RedbRecordStore};
    use crate::services::test_support::{CountingStore, put};
    use shared::models::Employee;
    use std::sync::Arc;

    fn person(id: &str, reports: &[&str]) -> Employee {
        Employee::new(id, "Tester", "Developer", "Engineering")
            .with_id(id)
            .with_direct_reports(reports.iter().copied())
    }

    fn calculator(people: Vec<Employee>) -> (ReportingStructureCalculator, Arc<CountingStore>) {
        let inner = RedbRecordStore::open_in_memory().unwrap();
        for p in people {
            put(&inner, p);
        }
        let store = Arc::new(CountingStore::new(inner));
        let store_dyn: Arc<dyn RecordStore> = store.clone();
        let calculator = ReportingStructureCalculator::new(EmployeeDirectory::new(store_dyn));
        (calculator, store)
    }

    fn count_for(calculator: &ReportingStructureCalculator, id: &str) -> Option<usize> {
        calculator
            .find_reporting_structure(id)
            .unwrap()
            .number_of_reports
    }

    #[test]
    fn test_no_reports_is_zero() {
        let (calculator, _) = calculator(vec![person("solo", &[])]);
        let result = calculator.find_reporting_structure("solo").unwrap();
        assert_eq!(result.number_of_reports, Some(0));
        assert_eq!(result.employee.unwrap().employee_id, "solo");
    }

    #[test]
    fn test_transitive_count() {
        let (calculator, _) = calculator(vec![
            person("root", &["a", "b"]),
            person("a", &[]),
            person("b", &["c"]),
            person("c", &[]),
        ]);
        assert_eq!(count_for(&calculator, "root"), Some(3));
        assert_eq!(count_for(&calculator, "b"), Some(1));
    }

    #[test]
    fn test_diamond_counts_once() {
        let (calculator, _) = calculator(vec![
            person("root", &["a", "b"]),
            person("a", &["d"]),
            person("b", &["d"]),
            person("d", &[]),
        ]);
        assert_eq!(count_for(&calculator, "root"), Some(3));
    }

    #[test]
    fn test_cycle_terminates() {
        let (calculator, _) = calculator(vec![
            person("a", &["b"]),
            person("b", &["c"]),
            person("c", &["a"]),
        ]);
        // the root is never counted, even when reachable from its reports
        assert_eq!(count_for(&calculator, "a"), Some(2));
    }

    #[test]
    fn test_self_report_ignored() {
        let (calculator, _) = calculator(vec![person("a", &["a", "b"]), person("b", &[])]);
        assert_eq!(count_for(&calculator, "a"), Some(1));
    }

    #[test]
    fn test_dangling_report_still_counted() {
        let (calculator, _) = calculator(vec![person("root", &["gone", "a"]), person("a", &[])]);
        assert_eq!(count_for(&calculator, "root"), Some(2));
    }

    #[test]
    fn test_unknown_or_blank_is_empty() {
        let (calculator, _) = calculator(vec![]);
        assert!(calculator.find_reporting_structure("nope").unwrap().is_empty());
        let blank = calculator.find_reporting_structure("   ").unwrap();
        assert!(blank.employee.is_none());
        assert!(blank.number_of_reports.is_none());
    }

    #[test]
    fn test_one_read_per_reachable_employee() {
        let (calculator, store) = calculator(vec![
            person("root", &["a", "b", "a"]),
            person("a", &["c"]),
            person("b", &["c"]),
            person("c", &[]),
        ]);
        assert_eq!(count_for(&calculator, "root"), Some(3));
        // root + a + b + c
        assert_eq!(store.reads(), 4);
    }

    #[test]
    fn test_sample_hierarchy() {
        let (calculator, _) = calculator(vec![
            person("john", &["paul", "ringo"]),
            person("paul", &[]),
            person("ringo", &["pete", "george"]),
            person("pete", &[]),
            person("george", &[]),
        ]);
        assert_eq!(count_for(&calculator, "john"), Some(4));
        assert_eq!(count_for(&calculator, "ringo"), Some(2));
        assert_eq!(count_for(&calculator, "paul"), Some(0));
    }
}
