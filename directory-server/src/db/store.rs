//! redb-based record store for employee records
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `employees` | `employee_id` | `{ version, employee }` JSON | Employee records |
//!
//! # Versioning
//!
//! Every record carries a version token starting at 1 and bumped on each
//! write. Writers state a [`WriteExpectation`]; the store checks it inside the
//! same write transaction that replaces the record, so a read-modify-write
//! cycle can detect that someone else wrote in between.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};
use shared::models::Employee;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for storing employees: key = employee_id, value = JSON-serialized StoredEmployee
const EMPLOYEES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("employees");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Version conflict on {id}: expected {expected}, found {}", describe_found(.found))]
    VersionConflict {
        id: String,
        expected: WriteExpectation,
        found: Option<u64>,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

fn describe_found(found: &Option<u64>) -> String {
    match found {
        Some(v) => format!("version {v}"),
        None => "no record".to_string(),
    }
}

/// A stored value together with its version token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Condition a write must satisfy against the record currently stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteExpectation {
    /// Unconditional insert-or-replace
    Any,
    /// No record may exist under the key
    Absent,
    /// The stored record must be at exactly this version
    Version(u64),
}

impl WriteExpectation {
    /// Whether a write is allowed given the version currently stored
    pub fn allows(&self, found: Option<u64>) -> bool {
        match self {
            Self::Any => true,
            Self::Absent => found.is_none(),
            Self::Version(expected) => found == Some(*expected),
        }
    }
}

impl fmt::Display for WriteExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any version"),
            Self::Absent => write!(f, "no record"),
            Self::Version(v) => write!(f, "version {v}"),
        }
    }
}

/// Persistence seam used by the directory services
///
/// Implementations must be safe to share between request handlers.
pub trait RecordStore: Send + Sync {
    /// Point lookup
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Versioned<Employee>>>;

    /// Batch lookup; identifiers without a record are omitted from the result
    fn find_all_by_id(&self, ids: &[String]) -> StoreResult<Vec<Versioned<Employee>>>;

    /// Insert or replace the record keyed by `employee.employee_id`
    fn upsert(
        &self,
        employee: Employee,
        expectation: WriteExpectation,
    ) -> StoreResult<Versioned<Employee>>;

    /// Number of stored records
    fn count(&self) -> StoreResult<usize>;
}

/// On-disk form of a record
#[derive(Serialize, Deserialize)]
struct StoredEmployee {
    version: u64,
    employee: Employee,
}

impl From<StoredEmployee> for Versioned<Employee> {
    fn from(stored: StoredEmployee) -> Self {
        Versioned {
            version: stored.version,
            value: stored.employee,
        }
    }
}

/// Employee store backed by redb
#[derive(Clone)]
pub struct RedbRecordStore {
    db: Arc<Database>,
}

impl RedbRecordStore {
    /// Open or create the database at the given path
    ///
    /// Parent directories are not created here; callers prepare the work
    /// directory first.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    ///
    /// Used by tests and by `STORAGE_BACKEND=memory`. Contents are lost when
    /// the last handle is dropped.
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create the table if it doesn't exist so read transactions can open it
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(EMPLOYEES_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn decode(bytes: &[u8]) -> StoreResult<Versioned<Employee>> {
        let stored: StoredEmployee = serde_json::from_slice(bytes)?;
        Ok(stored.into())
    }
}

impl RecordStore for RedbRecordStore {
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Versioned<Employee>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMPLOYEES_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(Self::decode(guard.value())?)),
            None => Ok(None),
        }
    }

    fn find_all_by_id(&self, ids: &[String]) -> StoreResult<Vec<Versioned<Employee>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMPLOYEES_TABLE)?;

        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(guard) = table.get(id.as_str())? {
                found.push(Self::decode(guard.value())?);
            }
        }
        Ok(found)
    }

    fn upsert(
        &self,
        employee: Employee,
        expectation: WriteExpectation,
    ) -> StoreResult<Versioned<Employee>> {
        let txn = self.db.begin_write()?;
        let saved = {
            let mut table = txn.open_table(EMPLOYEES_TABLE)?;

            let current = match table.get(employee.employee_id.as_str())? {
                Some(guard) => Some(Self::decode(guard.value())?.version),
                None => None,
            };
            if !expectation.allows(current) {
                // Dropping the transaction aborts it
                return Err(StoreError::VersionConflict {
                    id: employee.employee_id,
                    expected: expectation,
                    found: current,
                });
            }

            let stored = StoredEmployee {
                version: current.map_or(1, |v| v + 1),
                employee,
            };
            let bytes = serde_json::to_vec(&stored)?;
            table.insert(stored.employee.employee_id.as_str(), bytes.as_slice())?;
            stored
        };
        txn.commit()?;

        Ok(saved.into())
    }

    fn count(&self) -> StoreResult<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMPLOYEES_TABLE)?;
        Ok(table.len()? as usize)
    }
}
