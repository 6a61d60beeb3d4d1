//! Voice note use-case service.
//!
//! # Invariants
//! - A blank title becomes `Recording N` for the event's N-th recording.
//! - URLs are stored trimmed and never fetched.

use crate::model::event::{EventId, TimelineId};
use crate::model::recording::{default_recording_title, Recording, RecordingId};
use crate::repo::event_repo::RepoResult;
use crate::repo::recording_repo::RecordingRepository;
use log::info;

pub struct RecordingService<R: RecordingRepository> {
    recordings: R,
}

impl<R: RecordingRepository> RecordingService<R> {
    pub fn new(recordings: R) -> Self {
        Self { recordings }
    }

    /// Attaches a recording URL to an event.
    pub fn add_recording(
        &self,
        event_id: EventId,
        title: Option<&str>,
        url: &str,
    ) -> RepoResult<Recording> {
        let title = match title.map(str::trim).filter(|title| !title.is_empty()) {
            Some(title) => title.to_string(),
            None => default_recording_title(self.recordings.list_for_event(event_id)?.len()),
        };
        let recording = Recording::new(event_id, title, url.trim());
        self.recordings.create_recording(&recording)?;
        info!("event=recording_create module=service status=ok");
        Ok(recording)
    }

    pub fn rename_recording(&self, id: RecordingId, title: &str) -> RepoResult<()> {
        self.recordings.rename_recording(id, title.trim())
    }

    pub fn delete_recording(&self, id: RecordingId) -> RepoResult<()> {
        self.recordings.delete_recording(id)
    }

    pub fn recordings_for_event(&self, event_id: EventId) -> RepoResult<Vec<Recording>> {
        self.recordings.list_for_event(event_id)
    }

    /// Every recording of a timeline, grouped by event date.
    pub fn recordings_for_timeline(&self, timeline_id: TimelineId) -> RepoResult<Vec<Recording>> {
        self.recordings.list_for_timeline(timeline_id)
    }
}
