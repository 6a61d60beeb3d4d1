//! Voice note reference attached to one event.
//!
//! Only the URL is stored; audio bytes live wherever the URL points.

use crate::model::event::EventId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RecordingId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub uuid: RecordingId,
    pub event_id: EventId,
    pub title: String,
    pub url: String,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at_ms: i64,
}

impl Recording {
    pub fn new(event_id: EventId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            event_id,
            title: title.into(),
            url: url.into(),
            created_at_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("recording title", &self.title)?;
        require_text("recording url", &self.url)
    }
}

/// Title used when a recording is added without one: `Recording N`, where
/// `N` counts the event's recordings including the new one.
pub fn default_recording_title(existing: usize) -> String {
    format!("Recording {}", existing + 1)
}
