//! Compensation History Manager
//!
//! History only grows, and each new entry must be effective strictly after
//! the latest one already recorded. Storage order is not relied on; the
//! latest entry and the sorted history are recomputed on every call.

use shared::models::{Compensation, Employee, EmployeeRef};

use super::directory::EmployeeDirectory;
use super::error::{DirectoryError, DirectoryResult};
use super::retry_on_conflict;

#[derive(Clone)]
pub struct CompensationHistory {
    directory: EmployeeDirectory,
}

impl CompensationHistory {
    pub fn new(directory: EmployeeDirectory) -> Self {
        Self { directory }
    }

    /// Append `compensation` to the history of employee `id`
    pub fn add_compensation(
        &self,
        id: &str,
        compensation: Compensation,
    ) -> DirectoryResult<Employee> {
        tracing::debug!(employee_id = %id, compensation = %compensation, "Adding compensation");

        let saved = retry_on_conflict(id, || {
            let current = self.directory.resolve(id)?;
            let mut employee = current.value;

            if let Some(latest) = employee.latest_compensation()
                && compensation.effective_date <= latest.effective_date
            {
                return Err(DirectoryError::CompensationInPast(format!(
                    "Failed to update employee {id}. Latest compensation {latest} is on or after requested compensation {compensation}"
                )));
            }

            let mut history = Vec::with_capacity(employee.compensation.len() + 1);
            history.extend(employee.compensation.iter().cloned());
            history.push(compensation.clone());
            employee.compensation = history;

            self.directory.save(employee, current.version)
        })?;

        crate::audit_log!("add_compensation", id, compensation.to_string());
        Ok(saved)
    }

    /// Compensation history of the referenced employee, oldest first
    pub fn find_compensation(&self, employee: &EmployeeRef) -> DirectoryResult<Vec<Compensation>> {
        tracing::debug!(employee_id = %employee.employee_id, "Finding compensation");
        let current = self.directory.resolve(&employee.employee_id)?;
        Ok(current.value.compensation_history())
    }
}
