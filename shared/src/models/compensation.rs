//! Compensation Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// One entry of an employee's compensation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    #[validate(custom(function = "validate_salary"))]
    pub salary: Decimal,
    pub effective_date: NaiveDate,
}

impl Compensation {
    pub fn new(salary: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            salary,
            effective_date,
        }
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(salary {}, effective {})",
            self.salary, self.effective_date
        )
    }
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(ValidationError::new("salary_negative"));
    }
    Ok(())
}
