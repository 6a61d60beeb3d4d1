//! Timeline sharing records.

use crate::model::event::TimelineId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// One email address a timeline is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineShare {
    pub timeline_id: TimelineId,
    /// Always lowercase.
    pub email: String,
    pub created_at_ms: i64,
}

/// Trims and lowercases `raw`; rejects values without a local part and a
/// domain around a single `@`.
pub fn normalize_share_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidEmail(raw.trim().to_string()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::normalize_share_email;
    use crate::model::validation::ValidationError;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(
            normalize_share_email("  Ana.Silva@Example.COM ").unwrap(),
            "ana.silva@example.com"
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "   ", "no-at-sign", "@example.com", "ana@", "a@b@c", "a b@c.d"] {
            assert!(
                matches!(
                    normalize_share_email(raw),
                    Err(ValidationError::InvalidEmail(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }
}
