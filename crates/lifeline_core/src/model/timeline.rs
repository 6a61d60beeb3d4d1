//! Timeline container model.

use crate::model::event::TimelineId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named container of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub uuid: TimelineId,
    pub name: String,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at_ms: i64,
    /// Number of events stored under this timeline at read time.
    pub event_count: u32,
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            created_at_ms: 0,
            event_count: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("timeline name", &self.name)
    }
}
