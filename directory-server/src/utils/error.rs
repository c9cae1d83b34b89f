//! Error glue between the services and the HTTP layer
//!
//! Re-exports the shared error types and holds the operator-contact sentence
//! appended to every internal-error response.

use std::sync::OnceLock;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

/// Contact sentence used when none was configured
pub const DEFAULT_SUPPORT_CONTACT: &str = "Please contact the directory operations team.";

static SUPPORT_CONTACT: OnceLock<String> = OnceLock::new();

/// Set the contact sentence; only the first call takes effect
pub fn set_support_contact(contact: impl Into<String>) {
    let contact = contact.into();
    if SUPPORT_CONTACT.set(contact).is_err() {
        tracing::debug!("Support contact already configured");
    }
}

pub fn support_contact() -> &'static str {
    SUPPORT_CONTACT
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_SUPPORT_CONTACT)
}

/// Caller-facing message for any failure that is not the caller's fault
pub fn internal_error_message() -> String {
    format!(
        "An internal error occurred while processing the request. {}",
        support_contact()
    )
}
