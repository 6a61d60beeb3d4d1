//! Journal repository contract and SQLite implementation.

use crate::model::event::{EventId, TimelineId};
use crate::model::journal::{JournalEntry, JournalId};
use crate::model::validation::require_text;
use crate::repo::event_repo::{event_exists, RepoError, RepoResult};
use crate::repo::parse_uuid;
use rusqlite::{params, Connection, Row};

const JOURNAL_SELECT_SQL: &str = "SELECT j.uuid, j.event_uuid, j.title, j.content, j.created_at
FROM journals j";

pub trait JournalRepository {
    /// Lists entries of one event, oldest first.
    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<JournalEntry>>;
    /// Lists entries of every event in one timeline, oldest first.
    fn list_for_timeline(&self, timeline_id: TimelineId) -> RepoResult<Vec<JournalEntry>>;
    fn create_journal(&self, entry: &JournalEntry) -> RepoResult<JournalId>;
    fn update_journal(&self, id: JournalId, title: &str, content: &str) -> RepoResult<()>;
    fn delete_journal(&self, id: JournalId) -> RepoResult<()>;
}

pub struct SqliteJournalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn collect(&self, sql: &str, key: String) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_journal_row(row)?);
        }
        Ok(entries)
    }
}

impl JournalRepository for SqliteJournalRepository<'_> {
    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<JournalEntry>> {
        self.collect(
            &format!(
                "{JOURNAL_SELECT_SQL}
                 WHERE j.event_uuid = ?1
                 ORDER BY j.created_at ASC, j.rowid ASC;"
            ),
            event_id.to_string(),
        )
    }

    fn list_for_timeline(&self, timeline_id: TimelineId) -> RepoResult<Vec<JournalEntry>> {
        self.collect(
            &format!(
                "{JOURNAL_SELECT_SQL}
                 JOIN events e ON e.uuid = j.event_uuid
                 WHERE e.timeline_uuid = ?1
                 ORDER BY j.created_at ASC, j.rowid ASC;"
            ),
            timeline_id.to_string(),
        )
    }

    fn create_journal(&self, entry: &JournalEntry) -> RepoResult<JournalId> {
        entry.validate()?;
        if !event_exists(self.conn, entry.event_id)? {
            return Err(RepoError::NotFound {
                entity: "event",
                id: entry.event_id,
            });
        }
        self.conn.execute(
            "INSERT INTO journals (uuid, event_uuid, title, content) VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.uuid.to_string(),
                entry.event_id.to_string(),
                entry.title.as_str(),
                entry.content.as_str(),
            ],
        )?;
        Ok(entry.uuid)
    }

    fn update_journal(&self, id: JournalId, title: &str, content: &str) -> RepoResult<()> {
        require_text("journal title", title)?;

        let changed = self.conn.execute(
            "UPDATE journals
             SET title = ?1, content = ?2, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![title, content, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "journal",
                id,
            });
        }
        Ok(())
    }

    fn delete_journal(&self, id: JournalId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journals WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "journal",
                id,
            });
        }
        Ok(())
    }
}

fn parse_journal_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    Ok(JournalEntry {
        uuid: parse_uuid(row, "uuid", "journals.uuid")?,
        event_id: parse_uuid(row, "event_uuid", "journals.event_uuid")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at_ms: row.get("created_at")?,
    })
}
