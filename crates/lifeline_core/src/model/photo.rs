//! Photo reference model.
//!
//! Photos hold a URL only; binary storage is handled elsewhere.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PhotoId = Uuid;

/// Category assigned when a photo is created without one.
pub const UNTAGGED_CATEGORY: &str = "untagged";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub uuid: PhotoId,
    pub url: String,
    pub name: String,
    pub category: String,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at_ms: i64,
}

impl Photo {
    pub fn new(url: impl Into<String>, name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            url: url.into(),
            name: name.into(),
            category: category
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| UNTAGGED_CATEGORY.to_string()),
            created_at_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("photo url", &self.url)?;
        require_text("photo name", &self.name)?;
        require_text("photo category", &self.category)
    }
}
