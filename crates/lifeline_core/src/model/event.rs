//! Event domain model.
//!
//! # Responsibility
//! - Define the dated record plotted on a timeline.
//! - Provide partial-update semantics via `EventPatch`.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another event.
//! - `title` and `category` are non-empty.
//! - `importance` stays within `1..=10`.

use crate::model::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for events.
pub type EventId = Uuid;

/// Stable identifier for timelines.
pub type TimelineId = Uuid;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;
/// Importance assigned when the caller leaves it unset.
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// One dated life event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub uuid: EventId,
    /// Owning timeline.
    pub timeline_id: TimelineId,
    pub title: String,
    pub description: Option<String>,
    /// Calendar date. Layout reads year and month; age also reads day.
    pub date: NaiveDate,
    /// Category key, resolved against merged category config.
    pub category: String,
    /// 1..=10, controls marker prominence.
    pub importance: u8,
    /// Cover image URL. Presence enlarges the estimated card height.
    pub image_url: Option<String>,
}

impl Event {
    /// Creates an event with a generated ID and default importance.
    pub fn new(
        timeline_id: TimelineId,
        title: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), timeline_id, title, date, category)
    }

    /// Creates an event with a caller-provided stable ID.
    pub fn with_id(
        uuid: EventId,
        timeline_id: TimelineId,
        title: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            timeline_id,
            title: title.into(),
            description: None,
            date,
            category: category.into(),
            importance: DEFAULT_IMPORTANCE,
            image_url: None,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Importance as consumed by the renderer, never below 1.
    pub fn effective_importance(&self) -> u8 {
        self.importance.max(MIN_IMPORTANCE)
    }

    /// Validates write-time invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;
        if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&self.importance) {
            return Err(ValidationError::ImportanceOutOfRange(self.importance));
        }
        Ok(())
    }
}

/// Partial update for an existing event.
///
/// `None` leaves a field untouched. Nullable fields use a nested `Option` so
/// callers can clear them with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub importance: Option<u8>,
    pub image_url: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies every set field onto `event`.
    pub fn apply(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(importance) = self.importance {
            event.importance = importance;
        }
        if let Some(image_url) = &self.image_url {
            event.image_url = image_url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventPatch, DEFAULT_IMPORTANCE};
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample() -> Event {
        Event::new(
            Uuid::new_v4(),
            "Graduated",
            NaiveDate::from_ymd_opt(2012, 6, 1).unwrap(),
            "education",
        )
    }

    #[test]
    fn new_event_uses_default_importance() {
        let event = sample();
        assert_eq!(event.importance, DEFAULT_IMPORTANCE);
        assert!(event.validate().is_ok());
        assert!(!event.has_image());
    }

    #[test]
    fn validate_rejects_blank_title_and_bad_importance() {
        let mut event = sample();
        event.title = "   ".to_string();
        assert_eq!(event.validate(), Err(ValidationError::EmptyField("title")));

        let mut event = sample();
        event.importance = 11;
        assert_eq!(
            event.validate(),
            Err(ValidationError::ImportanceOutOfRange(11))
        );
    }

    #[test]
    fn effective_importance_is_at_least_one() {
        let mut event = sample();
        event.importance = 0;
        assert_eq!(event.effective_importance(), 1);
    }

    #[test]
    fn patch_sets_and_clears_fields() {
        let mut event = sample();
        event.image_url = Some("cover.png".to_string());

        let patch = EventPatch {
            title: Some("Masters".to_string()),
            image_url: Some(None),
            ..EventPatch::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut event);

        assert_eq!(event.title, "Masters");
        assert_eq!(event.image_url, None);
        assert_eq!(event.category, "education");
    }
}
