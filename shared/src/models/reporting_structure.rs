//! Reporting Structure Model

use super::employee::Employee;
use serde::{Deserialize, Serialize};

/// Computed view: an employee and the number of people reporting to them,
/// directly or transitively
///
/// Both fields are `None` when the employee does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Option<Employee>,
    pub number_of_reports: Option<usize>,
}

impl ReportingStructure {
    /// Result for an unknown or blank identifier
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(employee: Employee, number_of_reports: usize) -> Self {
        Self {
            employee: Some(employee),
            number_of_reports: Some(number_of_reports),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee.is_none()
    }
}
