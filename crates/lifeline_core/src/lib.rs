//! Core domain logic for Lifeline.
//! This crate is the single source of truth for timeline data and layout.

pub mod classify;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use classify::{classify_photos, ClassifiablePhoto, Suggestion};
pub use layout::geometry::{canvas_width, pixel_x, TimelineSpan};
pub use layout::placement::{Anchor, Connector, Placement};
pub use layout::view::{zoom_in, zoom_out, ViewState};
pub use layout::{layout_timeline, EventLayout, TimelineLayout, YearMarker};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryMap, CustomCategory};
pub use model::event::{Event, EventId, EventPatch, TimelineId};
pub use model::journal::{JournalEntry, JournalId};
pub use model::photo::{Photo, PhotoId};
pub use model::recording::{Recording, RecordingId};
pub use model::settings::UserSettings;
pub use model::share::TimelineShare;
pub use model::timeline::Timeline;
pub use model::validation::ValidationError;
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use repo::journal_repo::{JournalRepository, SqliteJournalRepository};
pub use repo::photo_repo::{PhotoRepository, SqlitePhotoRepository};
pub use repo::recording_repo::{RecordingRepository, SqliteRecordingRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::timeline_repo::{SqliteTimelineRepository, TimelineRepository};
pub use service::category_service::{CategoryError, CategoryService};
pub use service::event_service::{EventService, NewEvent};
pub use service::journal_service::{
    JournalListItem, JournalQuery, JournalService, JournalSortKey, SortDirection,
};
pub use service::photo_service::PhotoService;
pub use service::recording_service::RecordingService;
pub use service::timeline_service::{TimelineService, TimelineView};

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
