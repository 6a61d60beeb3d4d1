//! Shared validation errors for domain records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before a record is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Event importance outside `1..=10`.
    ImportanceOutOfRange(u8),
    /// Share target that does not look like an email address.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::ImportanceOutOfRange(value) => {
                write!(f, "importance must be within 1..=10, got {value}")
            }
            Self::InvalidEmail(value) => write!(f, "invalid share email `{value}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
