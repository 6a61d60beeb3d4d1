//! Timeline use-case service.
//!
//! # Responsibility
//! - Manage timeline containers and the addresses they are shared with.
//! - Assemble one render pass: stored events plus their computed layout.

use crate::layout::view::ViewState;
use crate::layout::{layout_timeline, TimelineLayout};
use crate::model::event::{Event, TimelineId};
use crate::model::share::{normalize_share_email, TimelineShare};
use crate::model::timeline::Timeline;
use crate::repo::event_repo::{EventRepository, RepoError, RepoResult};
use crate::repo::timeline_repo::TimelineRepository;
use crate::service::event_service::sort_by_date;
use log::info;
use std::time::Instant;

/// Name given to the timeline created on first use.
pub const DEFAULT_TIMELINE_NAME: &str = "My Timeline";

/// One render pass worth of timeline data.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub timeline: Timeline,
    /// Every stored event, date ascending, before category filtering.
    pub events: Vec<Event>,
    /// `None` when the timeline has no events.
    pub layout: Option<TimelineLayout>,
}

impl TimelineView {
    /// Events that were placed by the layout, in render order.
    pub fn visible_events(&self) -> Vec<&Event> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };
        layout
            .events
            .iter()
            .filter_map(|placed| self.events.iter().find(|event| event.uuid == placed.event_id))
            .collect()
    }
}

pub struct TimelineService<T: TimelineRepository, E: EventRepository> {
    timelines: T,
    events: E,
}

impl<T: TimelineRepository, E: EventRepository> TimelineService<T, E> {
    pub fn new(timelines: T, events: E) -> Self {
        Self { timelines, events }
    }

    pub fn list_timelines(&self) -> RepoResult<Vec<Timeline>> {
        self.timelines.list_timelines()
    }

    pub fn create_timeline(&self, name: impl Into<String>) -> RepoResult<Timeline> {
        let timeline = Timeline::new(name.into().trim());
        let id = self.timelines.create_timeline(&timeline)?;
        self.require_timeline(id)
    }

    /// Returns the oldest timeline, creating the default one when none exist.
    pub fn ensure_default_timeline(&self) -> RepoResult<Timeline> {
        if let Some(first) = self.timelines.list_timelines()?.into_iter().next() {
            return Ok(first);
        }
        info!("event=timeline_bootstrap module=service status=created");
        self.create_timeline(DEFAULT_TIMELINE_NAME)
    }

    pub fn rename_timeline(&self, id: TimelineId, name: &str) -> RepoResult<Timeline> {
        self.timelines.rename_timeline(id, name)?;
        self.require_timeline(id)
    }

    /// Deletes a timeline together with its events.
    pub fn delete_timeline(&self, id: TimelineId) -> RepoResult<()> {
        self.timelines.delete_timeline(id)
    }

    /// Shares a timeline with `email`, lowercased. Sharing twice with the
    /// same address is a no-op.
    pub fn share_timeline(&self, id: TimelineId, email: &str) -> RepoResult<TimelineShare> {
        let email = normalize_share_email(email)?;
        let added = self.timelines.share_timeline(id, &email)?;
        info!(
            "event=timeline_share module=service status={}",
            if added { "added" } else { "unchanged" }
        );
        self.timelines
            .shared_with(id)?
            .into_iter()
            .find(|share| share.email == email)
            .ok_or(RepoError::NotFound {
                entity: "timeline share",
                id,
            })
    }

    /// Stops sharing a timeline with `email`; returns whether a share existed.
    pub fn unshare_timeline(&self, id: TimelineId, email: &str) -> RepoResult<bool> {
        let email = normalize_share_email(email)?;
        self.timelines.unshare_timeline(id, &email)
    }

    /// Addresses a timeline is shared with, oldest first.
    pub fn shared_with(&self, id: TimelineId) -> RepoResult<Vec<TimelineShare>> {
        self.require_timeline(id)?;
        self.timelines.shared_with(id)
    }

    /// Timelines other owners shared with `email`.
    pub fn timelines_shared_with(&self, email: &str) -> RepoResult<Vec<Timeline>> {
        let email = normalize_share_email(email)?;
        self.timelines.timelines_shared_with(&email)
    }

    /// Loads a timeline's events and lays them out for `view`.
    pub fn timeline_view(&self, id: TimelineId, view: &ViewState) -> RepoResult<TimelineView> {
        let started_at = Instant::now();
        let timeline = self.require_timeline(id)?;
        let mut events = self.events.list_events(id)?;
        sort_by_date(&mut events);
        let layout = layout_timeline(&events, view);

        info!(
            "event=timeline_view module=service status=ok events={} placed={} duration_ms={}",
            events.len(),
            layout.as_ref().map_or(0, |layout| layout.events.len()),
            started_at.elapsed().as_millis()
        );

        Ok(TimelineView {
            timeline,
            events,
            layout,
        })
    }

    fn require_timeline(&self, id: TimelineId) -> RepoResult<Timeline> {
        self.timelines.get_timeline(id)?.ok_or(RepoError::NotFound {
            entity: "timeline",
            id,
        })
    }
}
