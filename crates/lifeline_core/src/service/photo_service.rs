//! Photo use-case service.
//!
//! # Responsibility
//! - Create, tag and remove photo references.
//! - Feed a timeline's photos to the reassignment classifier.

use crate::classify::{classify_photos, ClassifiablePhoto, Suggestion};
use crate::model::event::{Event, EventId, TimelineId};
use crate::model::photo::{Photo, PhotoId};
use crate::repo::event_repo::{EventRepository, RepoResult};
use crate::repo::photo_repo::PhotoRepository;
use log::info;

pub struct PhotoService<P: PhotoRepository, E: EventRepository> {
    photos: P,
    events: E,
}

impl<P: PhotoRepository, E: EventRepository> PhotoService<P, E> {
    pub fn new(photos: P, events: E) -> Self {
        Self { photos, events }
    }

    /// Registers a photo URL. Url and name are required; category defaults
    /// to `untagged`.
    pub fn create_photo(
        &self,
        url: &str,
        name: &str,
        category: Option<String>,
    ) -> RepoResult<Photo> {
        let photo = Photo::new(url.trim(), name.trim(), category);
        self.photos.create_photo(&photo)?;
        Ok(photo)
    }

    pub fn list_photos(&self, category: Option<&str>) -> RepoResult<Vec<Photo>> {
        self.photos.list_photos(category)
    }

    pub fn delete_photo(&self, id: PhotoId) -> RepoResult<()> {
        self.photos.delete_photo(id)
    }

    pub fn tag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()> {
        self.photos.tag_photo(photo_id, event_id)
    }

    pub fn untag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()> {
        self.photos.untag_photo(photo_id, event_id)
    }

    pub fn photos_for_event(&self, event_id: EventId) -> RepoResult<Vec<Photo>> {
        self.photos.photos_for_event(event_id)
    }

    pub fn events_for_photo(&self, photo_id: PhotoId) -> RepoResult<Vec<Event>> {
        self.photos.events_for_photo(photo_id)
    }

    /// Suggests moving tagged photos to better-matching events of a timeline.
    ///
    /// Event cover images take part as fixed members of their event.
    pub fn suggest_reassignments(&self, timeline_id: TimelineId) -> RepoResult<Vec<Suggestion>> {
        let events = self.events.list_events(timeline_id)?;
        let mut candidates = Vec::new();
        for event in &events {
            if event.has_image() {
                candidates.push(ClassifiablePhoto {
                    photo_key: format!("{}-main", event.uuid),
                    name: event.title.clone(),
                    event_id: event.uuid,
                    is_cover: true,
                });
            }
            for photo in self.photos.photos_for_event(event.uuid)? {
                candidates.push(ClassifiablePhoto {
                    photo_key: photo.uuid.to_string(),
                    name: photo.name,
                    event_id: event.uuid,
                    is_cover: false,
                });
            }
        }

        let suggestions = classify_photos(&candidates, &events);
        info!(
            "event=photo_classify module=service status=ok photos={} suggestions={}",
            candidates.len(),
            suggestions.len()
        );
        Ok(suggestions)
    }
}
