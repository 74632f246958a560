//! Validation errors for content records.

use thiserror::Error;

/// Result type for validation checks.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A record or request failed a write-side check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Email address is not syntactically valid
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Publication year outside the 4-digit calendar range
    #[error("year must be a 4-digit calendar year, got {0}")]
    InvalidYear(i32),

    /// Publication type outside the known set
    #[error("unknown publication type: {0}")]
    UnknownPublicationType(String),

    /// News date is not a `YYYY-MM-DD` calendar date
    #[error("date must be an ISO-8601 calendar date (YYYY-MM-DD), got {0}")]
    InvalidDate(String),

    /// Request body could not be decoded at all
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Reject a blank value for the named field.
pub(crate) fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
