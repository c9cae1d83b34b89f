//! Seed data loader
//!
//! Fills an empty store from a JSON array of employees. Identifiers in the
//! file are kept as-is so the hierarchy between records stays intact.

use anyhow::Context;
use shared::models::Employee;
use std::path::Path;

use super::store::{RecordStore, WriteExpectation};

/// Load `path` into `store` if the store holds no records yet
///
/// Returns the number of employees written. A non-empty store is left alone.
pub fn seed_if_empty(store: &dyn RecordStore, path: impl AsRef<Path>) -> anyhow::Result<usize> {
    let path = path.as_ref();

    let existing = store.count()?;
    if existing > 0 {
        tracing::debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let employees: Vec<Employee> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Invalid seed file {}", path.display()))?;

    let mut written = 0;
    for employee in employees {
        if employee.has_blank_id() {
            tracing::warn!(employee = %employee, "Skipping seed entry without employeeId");
            continue;
        }
        store
            .upsert(employee, WriteExpectation::Absent)
            .context("Failed to write seed record")?;
        written += 1;
    }

    tracing::info!(count = written, file = %path.display(), "Seeded employee store");
    Ok(written)
}
