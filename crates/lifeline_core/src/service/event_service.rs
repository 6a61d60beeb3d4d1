//! Event use-case service.
//!
//! # Responsibility
//! - Provide the event store operations to core callers.
//! - Produce the date-sorted, category-filtered sequence the layout engine
//!   consumes.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Listed events are sorted by date ascending; ties keep store order.

use crate::layout::view::ViewState;
use crate::model::event::{Event, EventId, EventPatch, TimelineId, DEFAULT_IMPORTANCE};
use crate::repo::event_repo::{EventRepository, RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Request model for creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category: String,
    /// Defaults to 5 when unset.
    pub importance: Option<u8>,
    pub image_url: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date,
            category: category.into(),
            importance: None,
            image_url: None,
        }
    }
}

/// Use-case service wrapper for event operations.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every event of a timeline, date ascending.
    pub fn list_events(&self, timeline_id: TimelineId) -> RepoResult<Vec<Event>> {
        let mut events = self.repo.list_events(timeline_id)?;
        sort_by_date(&mut events);
        Ok(events)
    }

    /// Lists events of a timeline that pass `view`'s category filter.
    pub fn list_visible(
        &self,
        timeline_id: TimelineId,
        view: &ViewState,
    ) -> RepoResult<Vec<Event>> {
        let events = self.list_events(timeline_id)?;
        Ok(events
            .into_iter()
            .filter(|event| view.includes(&event.category))
            .collect())
    }

    pub fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.repo.get_event(id)
    }

    /// Creates an event and returns the stored record.
    ///
    /// # Contract
    /// - Title and category are trimmed.
    /// - Missing importance defaults to 5.
    pub fn create_event(&self, timeline_id: TimelineId, request: NewEvent) -> RepoResult<Event> {
        let mut event = Event::new(
            timeline_id,
            request.title.trim(),
            request.date,
            request.category.trim(),
        );
        event.description = request.description.filter(|text| !text.trim().is_empty());
        event.importance = request.importance.unwrap_or(DEFAULT_IMPORTANCE);
        event.image_url = request.image_url.filter(|url| !url.trim().is_empty());

        self.repo.create_event(&event)?;
        self.repo.get_event(event.uuid)?.ok_or(RepoError::NotFound {
            entity: "event",
            id: event.uuid,
        })
    }

    /// Applies a partial update. An empty patch returns the stored record.
    pub fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event> {
        if patch.is_empty() {
            return self
                .repo
                .get_event(id)?
                .ok_or(RepoError::NotFound { entity: "event", id });
        }
        let updated = self.repo.update_event(id, patch)?;
        info!("event=event_update module=service status=ok");
        Ok(updated)
    }

    pub fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.repo.delete_event(id)?;
        info!("event=event_delete module=service status=ok");
        Ok(())
    }
}

/// Stable date-ascending sort.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by_key(|event| event.date);
}

/// Keeps events whose category is in `categories`, preserving order.
pub fn filter_by_categories(events: &[Event], categories: &BTreeSet<String>) -> Vec<Event> {
    events
        .iter()
        .filter(|event| categories.contains(&event.category))
        .cloned()
        .collect()
}

/// Parses a stable ID from user input.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
