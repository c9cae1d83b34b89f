//! Employee Model

use super::MAX_NAME_LEN;
use super::compensation::Compensation;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Employee record
///
/// Direct reports are held as identifiers only. Equality covers the scalar
/// fields; compensation and direct reports are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    #[validate(length(max = MAX_NAME_LEN))]
    pub first_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    #[validate(length(max = MAX_NAME_LEN))]
    pub last_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    #[validate(length(max = MAX_NAME_LEN))]
    pub position: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    #[validate(length(max = MAX_NAME_LEN))]
    pub department: String,
    #[serde(default, with = "serde_helpers::report_refs")]
    pub direct_reports: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::vec_or_empty")]
    #[validate(nested)]
    pub compensation: Vec<Compensation>,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            position: position.into(),
            department: department.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = employee_id.into();
        self
    }

    pub fn with_direct_reports<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direct_reports = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compensation(mut self, compensation: Vec<Compensation>) -> Self {
        self.compensation = compensation;
        self
    }

    /// Whether the identifier is missing or whitespace only
    pub fn has_blank_id(&self) -> bool {
        self.employee_id.trim().is_empty()
    }

    pub fn has_direct_reports(&self) -> bool {
        !self.direct_reports.is_empty()
    }

    /// Direct-report identifiers in first-occurrence order, duplicates removed
    pub fn distinct_direct_reports(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.direct_reports
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Compare name, position and department, ignoring the identifier
    pub fn same_profile(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.position == other.position
            && self.department == other.department
    }

    /// Copy name, position and department from `other`
    pub fn apply_profile(&mut self, other: &Self) {
        self.first_name.clone_from(&other.first_name);
        self.last_name.clone_from(&other.last_name);
        self.position.clone_from(&other.position);
        self.department.clone_from(&other.department);
    }

    /// Entry with the greatest effective date
    pub fn latest_compensation(&self) -> Option<&Compensation> {
        self.compensation.iter().max_by_key(|c| c.effective_date)
    }

    /// Compensation entries ordered by effective date ascending
    pub fn compensation_history(&self) -> Vec<Compensation> {
        let mut history = self.compensation.clone();
        history.sort_by_key(|c| c.effective_date);
        history
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.employee_id == other.employee_id && self.same_profile(other)
    }
}

impl Eq for Employee {}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.first_name, self.last_name, self.position, self.department
        )
    }
}

/// Reference to an employee by identifier
///
/// Accepts a full employee body; only `employeeId` is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub employee_id: String,
}

impl EmployeeRef {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
        }
    }
}
