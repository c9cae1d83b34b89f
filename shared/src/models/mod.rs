//! Data models
//!
//! Shared between directory-server and its HTTP clients.
//! Wire format is camelCase JSON; dates are `yyyy-MM-dd`, salaries are
//! exact decimals.

pub mod compensation;
pub mod employee;
pub mod reporting_structure;
pub mod serde_helpers;

// Re-exports
pub use compensation::*;
pub use employee::*;
pub use reporting_structure::*;

/// Maximum length for names, positions and departments
pub const MAX_NAME_LEN: u64 = 200;
