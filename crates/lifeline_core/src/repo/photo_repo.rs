//! Photo repository: photo references and photo-to-event tagging.
//!
//! # Invariants
//! - Tagging is idempotent; re-tagging an existing pair is a no-op.
//! - Untagging or deleting does not touch the event rows.

use crate::model::event::{Event, EventId};
use crate::model::photo::{Photo, PhotoId};
use crate::repo::event_repo::{event_exists, parse_event_row, RepoError, RepoResult};
use crate::repo::{bool_exists, parse_uuid};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const PHOTO_SELECT_SQL: &str =
    "SELECT p.uuid, p.url, p.name, p.category, p.created_at FROM photos p";

pub trait PhotoRepository {
    fn create_photo(&self, photo: &Photo) -> RepoResult<PhotoId>;
    fn get_photo(&self, id: PhotoId) -> RepoResult<Option<Photo>>;
    /// Lists photos newest first, optionally restricted to one category.
    fn list_photos(&self, category: Option<&str>) -> RepoResult<Vec<Photo>>;
    fn update_photo(&self, photo: &Photo) -> RepoResult<()>;
    fn delete_photo(&self, id: PhotoId) -> RepoResult<()>;
    fn tag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()>;
    fn untag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()>;
    fn photos_for_event(&self, event_id: EventId) -> RepoResult<Vec<Photo>>;
    fn events_for_photo(&self, photo_id: PhotoId) -> RepoResult<Vec<Event>>;
}

pub struct SqlitePhotoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePhotoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn collect_photos(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Photo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut photos = Vec::new();
        while let Some(row) = rows.next()? {
            photos.push(parse_photo_row(row)?);
        }
        Ok(photos)
    }

    fn ensure_photo(&self, id: PhotoId) -> RepoResult<()> {
        if bool_exists(
            self.conn,
            "SELECT EXISTS(SELECT 1 FROM photos WHERE uuid = ?1);",
            id,
        )? {
            return Ok(());
        }
        Err(RepoError::NotFound { entity: "photo", id })
    }

    fn ensure_event(&self, id: EventId) -> RepoResult<()> {
        if event_exists(self.conn, id)? {
            return Ok(());
        }
        Err(RepoError::NotFound { entity: "event", id })
    }
}

impl PhotoRepository for SqlitePhotoRepository<'_> {
    fn create_photo(&self, photo: &Photo) -> RepoResult<PhotoId> {
        photo.validate()?;
        self.conn.execute(
            "INSERT INTO photos (uuid, url, name, category) VALUES (?1, ?2, ?3, ?4);",
            params![
                photo.uuid.to_string(),
                photo.url.as_str(),
                photo.name.as_str(),
                photo.category.as_str(),
            ],
        )?;
        Ok(photo.uuid)
    }

    fn get_photo(&self, id: PhotoId) -> RepoResult<Option<Photo>> {
        let photos = self.collect_photos(
            &format!("{PHOTO_SELECT_SQL} WHERE p.uuid = ?;"),
            vec![Value::Text(id.to_string())],
        )?;
        Ok(photos.into_iter().next())
    }

    fn list_photos(&self, category: Option<&str>) -> RepoResult<Vec<Photo>> {
        let mut sql = format!("{PHOTO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values = Vec::new();
        if let Some(category) = category {
            sql.push_str(" AND p.category = ?");
            bind_values.push(Value::Text(category.to_string()));
        }
        sql.push_str(" ORDER BY p.created_at DESC, p.rowid DESC;");
        self.collect_photos(&sql, bind_values)
    }

    fn update_photo(&self, photo: &Photo) -> RepoResult<()> {
        photo.validate()?;
        let changed = self.conn.execute(
            "UPDATE photos
             SET url = ?1, name = ?2, category = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4;",
            params![
                photo.url.as_str(),
                photo.name.as_str(),
                photo.category.as_str(),
                photo.uuid.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "photo",
                id: photo.uuid,
            });
        }
        Ok(())
    }

    fn delete_photo(&self, id: PhotoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM photos WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "photo", id });
        }
        Ok(())
    }

    fn tag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()> {
        self.ensure_photo(photo_id)?;
        self.ensure_event(event_id)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO photo_events (photo_uuid, event_uuid) VALUES (?1, ?2);",
            params![photo_id.to_string(), event_id.to_string()],
        )?;
        Ok(())
    }

    fn untag_photo(&self, photo_id: PhotoId, event_id: EventId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM photo_events WHERE photo_uuid = ?1 AND event_uuid = ?2;",
            params![photo_id.to_string(), event_id.to_string()],
        )?;
        Ok(())
    }

    fn photos_for_event(&self, event_id: EventId) -> RepoResult<Vec<Photo>> {
        self.collect_photos(
            &format!(
                "{PHOTO_SELECT_SQL}
                 JOIN photo_events pe ON pe.photo_uuid = p.uuid
                 WHERE pe.event_uuid = ?
                 ORDER BY p.created_at ASC, p.rowid ASC;"
            ),
            vec![Value::Text(event_id.to_string())],
        )
    }

    fn events_for_photo(&self, photo_id: PhotoId) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.uuid, e.timeline_uuid, e.title, e.description, e.event_date,
                    e.category, e.importance, e.image_url
             FROM events e
             JOIN photo_events pe ON pe.event_uuid = e.uuid
             WHERE pe.photo_uuid = ?1
             ORDER BY e.event_date ASC, e.rowid ASC;",
        )?;
        let mut rows = stmt.query([photo_id.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }
}

fn parse_photo_row(row: &Row<'_>) -> RepoResult<Photo> {
    let photo = Photo {
        uuid: parse_uuid(row, "uuid", "photos.uuid")?,
        url: row.get("url")?,
        name: row.get("name")?,
        category: row.get("category")?,
        created_at_ms: row.get("created_at")?,
    };
    photo.validate()?;
    Ok(photo)
}
