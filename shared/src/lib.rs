//! Shared types for the employee directory
//!
//! Models exchanged over the HTTP API and the error codes every layer
//! reports through.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Compensation, Employee, EmployeeRef, ReportingStructure};
