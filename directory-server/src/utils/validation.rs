//! Input validation helpers
//!
//! Request bodies derive `validator::Validate` in the shared models; this
//! turns a failed validation into a `ValidationFailed` error whose message
//! lists every offending field path.

use std::collections::BTreeSet;

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::utils::AppError;

/// Validate a request payload
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|errors| AppError::validation(describe(&errors)))
}

/// Flatten validation errors into `path: code` entries, sorted by path
fn describe(errors: &ValidationErrors) -> String {
    let mut entries = BTreeSet::new();
    collect(errors, "", &mut entries);
    let entries: Vec<String> = entries.into_iter().collect();
    format!("Invalid request: {}", entries.join("; "))
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeSet<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.insert(format!("{path}: {}", error.code));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}
