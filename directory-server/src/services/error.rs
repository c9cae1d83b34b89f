//! Service-layer error type
//!
//! `DirectoryError` carries the four directory rule violations plus the
//! conflict and storage failures. Rule violations reach the caller verbatim;
//! everything else is logged and replaced by a generic message.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::StoreError;
use crate::utils::error::internal_error_message;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Employee ID must be specified.")]
    IdentifierNotSpecified,

    #[error("{0}")]
    IdentifierAlreadyExists(String),

    #[error("{0}")]
    EmployeeNotFound(String),

    #[error("{0}")]
    CompensationInPast(String),

    #[error("Employee {id} was modified concurrently, gave up after {attempts} attempts")]
    ConcurrentModification { id: String, attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DirectoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IdentifierNotSpecified => ErrorCode::IdentifierNotSpecified,
            Self::IdentifierAlreadyExists(_) => ErrorCode::IdentifierAlreadyExists,
            Self::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            Self::CompensationInPast(_) => ErrorCode::CompensationInPast,
            Self::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            Self::Store(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Store(store_err) => {
                tracing::error!(error = %store_err, "Record store failure");
                AppError::with_message(ErrorCode::DatabaseError, internal_error_message())
            }
            DirectoryError::ConcurrentModification { ref id, attempts } => {
                tracing::warn!(employee_id = %id, attempts, "Write conflict not resolved");
                AppError::with_message(e.code(), e.to_string())
            }
            other => {
                tracing::info!(code = %other.code(), message = %other, "Directory rule rejected request");
                AppError::with_message(other.code(), other.to_string())
            }
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
