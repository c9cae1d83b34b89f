//! Directory services
//!
//! # Modules
//!
//! - [`directory`] - create / read / update employees
//! - [`reporting`] - transitive report counts
//! - [`compensation`] - append-only compensation history
//!
//! All services are synchronous and share one [`RecordStore`](crate::db::RecordStore).

pub mod compensation;
pub mod directory;
pub mod error;
pub mod reporting;

pub use compensation::CompensationHistory;
pub use directory::EmployeeDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use reporting::ReportingStructureCalculator;

use crate::db::StoreError;

/// Attempts for one read-validate-write cycle before giving up
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Re-run `op` while its write loses a version race
///
/// `op` must re-read the record on every call so validation sees the fresh
/// state.
pub(crate) fn retry_on_conflict<T>(
    id: &str,
    mut op: impl FnMut() -> DirectoryResult<T>,
) -> DirectoryResult<T> {
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        match op() {
            Err(DirectoryError::Store(StoreError::VersionConflict { found, .. })) => {
                tracing::debug!(employee_id = %id, attempt, ?found, "Write conflict, retrying");
            }
            other => return other,
        }
    }

    Err(DirectoryError::ConcurrentModification {
        id: id.to_string(),
        attempts: MAX_WRITE_ATTEMPTS,
    })
}
