//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the event store operations (`list/create/update/delete`).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Event::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `list_events` returns rows ordered by date ascending, then creation order.

use crate::db::DbError;
use crate::model::event::{Event, EventId, EventPatch, TimelineId};
use crate::model::validation::ValidationError;
use crate::repo::{bool_exists, parse_uuid, timeline_exists};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    timeline_uuid,
    title,
    description,
    event_date,
    category,
    importance,
    image_url
FROM events";

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every store in this crate.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Event store contract.
pub trait EventRepository {
    fn list_events(&self, timeline_id: TimelineId) -> RepoResult<Vec<Event>>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn list_events(&self, timeline_id: TimelineId) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE timeline_uuid = ?1
             ORDER BY event_date ASC, created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([timeline_id.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;
        if !timeline_exists(self.conn, event.timeline_id)? {
            return Err(RepoError::NotFound {
                entity: "timeline",
                id: event.timeline_id,
            });
        }

        self.conn.execute(
            "INSERT INTO events (
                uuid,
                timeline_uuid,
                title,
                description,
                event_date,
                category,
                importance,
                image_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                event.uuid.to_string(),
                event.timeline_id.to_string(),
                event.title.as_str(),
                event.description.as_deref(),
                event.date.format(DATE_FORMAT).to_string(),
                event.category.as_str(),
                i64::from(event.importance),
                event.image_url.as_deref(),
            ],
        )?;
        info!("event=event_create module=repo status=ok");

        Ok(event.uuid)
    }

    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event> {
        let mut event = self.get_event(id)?.ok_or(RepoError::NotFound {
            entity: "event",
            id,
        })?;
        patch.apply(&mut event);
        event.validate()?;

        self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                description = ?2,
                event_date = ?3,
                category = ?4,
                importance = ?5,
                image_url = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                event.title.as_str(),
                event.description.as_deref(),
                event.date.format(DATE_FORMAT).to_string(),
                event.category.as_str(),
                i64::from(event.importance),
                event.image_url.as_deref(),
                id.to_string(),
            ],
        )?;

        Ok(event)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "event",
                id,
            });
        }
        Ok(())
    }
}

/// Returns whether an event row exists.
pub(crate) fn event_exists(conn: &Connection, id: EventId) -> RepoResult<bool> {
    bool_exists(conn, "SELECT EXISTS(SELECT 1 FROM events WHERE uuid = ?1);", id)
}

pub(crate) fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid = parse_uuid(row, "uuid", "events.uuid")?;
    let timeline_id = parse_uuid(row, "timeline_uuid", "events.timeline_uuid")?;

    let date_text: String = row.get("event_date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in events.event_date"))
    })?;

    let importance_raw: i64 = row.get("importance")?;
    let importance = u8::try_from(importance_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid importance `{importance_raw}` in events.importance"
        ))
    })?;

    let event = Event {
        uuid,
        timeline_id,
        title: row.get("title")?,
        description: row.get("description")?,
        date,
        category: row.get("category")?,
        importance,
        image_url: row.get("image_url")?,
    };
    event.validate()?;
    Ok(event)
}
