//! Journal entry model attached to one event.

use crate::model::event::EventId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JournalId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub uuid: JournalId,
    pub event_id: EventId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at_ms: i64,
}

impl JournalEntry {
    pub fn new(event_id: EventId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            event_id,
            title: title.into(),
            content: content.into(),
            created_at_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("journal title", &self.title)
    }
}
