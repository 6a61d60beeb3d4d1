//! Recording repository contract and SQLite implementation.
//!
//! # Invariants
//! - Recordings belong to exactly one event and go away with it.
//! - Lists are ordered oldest first.

use crate::model::event::{EventId, TimelineId};
use crate::model::recording::{Recording, RecordingId};
use crate::model::validation::require_text;
use crate::repo::event_repo::{event_exists, RepoError, RepoResult};
use crate::repo::parse_uuid;
use rusqlite::{params, Connection, Row};

const RECORDING_SELECT_SQL: &str = "SELECT r.uuid, r.event_uuid, r.title, r.url, r.created_at
FROM recordings r";

pub trait RecordingRepository {
    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<Recording>>;
    fn list_for_timeline(&self, timeline_id: TimelineId) -> RepoResult<Vec<Recording>>;
    fn create_recording(&self, recording: &Recording) -> RepoResult<RecordingId>;
    fn rename_recording(&self, id: RecordingId, title: &str) -> RepoResult<()>;
    fn delete_recording(&self, id: RecordingId) -> RepoResult<()>;
}

pub struct SqliteRecordingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn collect(&self, sql: &str, key: String) -> RepoResult<Vec<Recording>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        let mut recordings = Vec::new();
        while let Some(row) = rows.next()? {
            recordings.push(parse_recording_row(row)?);
        }
        Ok(recordings)
    }
}

impl RecordingRepository for SqliteRecordingRepository<'_> {
    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<Recording>> {
        self.collect(
            &format!(
                "{RECORDING_SELECT_SQL}
                 WHERE r.event_uuid = ?1
                 ORDER BY r.created_at ASC, r.rowid ASC;"
            ),
            event_id.to_string(),
        )
    }

    fn list_for_timeline(&self, timeline_id: TimelineId) -> RepoResult<Vec<Recording>> {
        self.collect(
            &format!(
                "{RECORDING_SELECT_SQL}
                 JOIN events e ON e.uuid = r.event_uuid
                 WHERE e.timeline_uuid = ?1
                 ORDER BY e.event_date ASC, r.created_at ASC, r.rowid ASC;"
            ),
            timeline_id.to_string(),
        )
    }

    fn create_recording(&self, recording: &Recording) -> RepoResult<RecordingId> {
        recording.validate()?;
        if !event_exists(self.conn, recording.event_id)? {
            return Err(RepoError::NotFound {
                entity: "event",
                id: recording.event_id,
            });
        }
        self.conn.execute(
            "INSERT INTO recordings (uuid, event_uuid, title, url) VALUES (?1, ?2, ?3, ?4);",
            params![
                recording.uuid.to_string(),
                recording.event_id.to_string(),
                recording.title.as_str(),
                recording.url.as_str(),
            ],
        )?;
        Ok(recording.uuid)
    }

    fn rename_recording(&self, id: RecordingId, title: &str) -> RepoResult<()> {
        require_text("recording title", title)?;

        let changed = self.conn.execute(
            "UPDATE recordings
             SET title = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![title, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "recording",
                id,
            });
        }
        Ok(())
    }

    fn delete_recording(&self, id: RecordingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM recordings WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "recording",
                id,
            });
        }
        Ok(())
    }
}

fn parse_recording_row(row: &Row<'_>) -> RepoResult<Recording> {
    let recording = Recording {
        uuid: parse_uuid(row, "uuid", "recordings.uuid")?,
        event_id: parse_uuid(row, "event_uuid", "recordings.event_uuid")?,
        title: row.get("title")?,
        url: row.get("url")?,
        created_at_ms: row.get("created_at")?,
    };
    recording.validate()?;
    Ok(recording)
}
