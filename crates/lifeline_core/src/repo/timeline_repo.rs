//! Timeline repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a timeline removes its events and shares (FK cascade).
//! - Lists are ordered by creation time, oldest first.
//! - Share emails are stored lowercase; one row per timeline and email.

use crate::model::event::TimelineId;
use crate::model::share::TimelineShare;
use crate::model::timeline::Timeline;
use crate::model::validation::require_text;
use crate::repo::event_repo::{RepoError, RepoResult};
use crate::repo::{parse_uuid, timeline_exists};
use rusqlite::{params, Connection, Row};

const TIMELINE_SELECT_SQL: &str = "SELECT
    t.uuid,
    t.name,
    t.created_at,
    (SELECT COUNT(*) FROM events e WHERE e.timeline_uuid = t.uuid) AS event_count
FROM timelines t";

pub trait TimelineRepository {
    fn list_timelines(&self) -> RepoResult<Vec<Timeline>>;
    fn get_timeline(&self, id: TimelineId) -> RepoResult<Option<Timeline>>;
    fn create_timeline(&self, timeline: &Timeline) -> RepoResult<TimelineId>;
    fn rename_timeline(&self, id: TimelineId, name: &str) -> RepoResult<()>;
    fn delete_timeline(&self, id: TimelineId) -> RepoResult<()>;
    /// Records `email` (already normalized) as a share target. Returns
    /// `false` when the pair already existed.
    fn share_timeline(&self, id: TimelineId, email: &str) -> RepoResult<bool>;
    fn unshare_timeline(&self, id: TimelineId, email: &str) -> RepoResult<bool>;
    /// Share targets of one timeline, oldest first.
    fn shared_with(&self, id: TimelineId) -> RepoResult<Vec<TimelineShare>>;
    /// Timelines shared with `email` (already normalized).
    fn timelines_shared_with(&self, email: &str) -> RepoResult<Vec<Timeline>>;
}

pub struct SqliteTimelineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTimelineRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TimelineRepository for SqliteTimelineRepository<'_> {
    fn list_timelines(&self) -> RepoResult<Vec<Timeline>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TIMELINE_SELECT_SQL} ORDER BY t.created_at ASC, t.rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut timelines = Vec::new();
        while let Some(row) = rows.next()? {
            timelines.push(parse_timeline_row(row)?);
        }
        Ok(timelines)
    }

    fn get_timeline(&self, id: TimelineId) -> RepoResult<Option<Timeline>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TIMELINE_SELECT_SQL} WHERE t.uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_timeline_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_timeline(&self, timeline: &Timeline) -> RepoResult<TimelineId> {
        timeline.validate()?;
        self.conn.execute(
            "INSERT INTO timelines (uuid, name) VALUES (?1, ?2);",
            params![timeline.uuid.to_string(), timeline.name.trim()],
        )?;
        Ok(timeline.uuid)
    }

    fn rename_timeline(&self, id: TimelineId, name: &str) -> RepoResult<()> {
        require_text("timeline name", name)?;

        let changed = self.conn.execute(
            "UPDATE timelines
             SET name = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![name.trim(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "timeline",
                id,
            });
        }
        Ok(())
    }

    fn delete_timeline(&self, id: TimelineId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM timelines WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "timeline",
                id,
            });
        }
        Ok(())
    }

    fn share_timeline(&self, id: TimelineId, email: &str) -> RepoResult<bool> {
        if !timeline_exists(self.conn, id)? {
            return Err(RepoError::NotFound {
                entity: "timeline",
                id,
            });
        }
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO timeline_shares (timeline_uuid, email) VALUES (?1, ?2);",
            params![id.to_string(), email],
        )?;
        Ok(inserted == 1)
    }

    fn unshare_timeline(&self, id: TimelineId, email: &str) -> RepoResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM timeline_shares WHERE timeline_uuid = ?1 AND email = ?2;",
            params![id.to_string(), email],
        )?;
        Ok(removed == 1)
    }

    fn shared_with(&self, id: TimelineId) -> RepoResult<Vec<TimelineShare>> {
        let mut stmt = self.conn.prepare(
            "SELECT timeline_uuid, email, created_at
             FROM timeline_shares
             WHERE timeline_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut shares = Vec::new();
        while let Some(row) = rows.next()? {
            shares.push(parse_share_row(row)?);
        }
        Ok(shares)
    }

    fn timelines_shared_with(&self, email: &str) -> RepoResult<Vec<Timeline>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TIMELINE_SELECT_SQL}
             JOIN timeline_shares s ON s.timeline_uuid = t.uuid
             WHERE s.email = ?1
             ORDER BY t.created_at ASC, t.rowid ASC;"
        ))?;
        let mut rows = stmt.query([email])?;
        let mut timelines = Vec::new();
        while let Some(row) = rows.next()? {
            timelines.push(parse_timeline_row(row)?);
        }
        Ok(timelines)
    }
}

fn parse_share_row(row: &Row<'_>) -> RepoResult<TimelineShare> {
    Ok(TimelineShare {
        timeline_id: parse_uuid(row, "timeline_uuid", "timeline_shares.timeline_uuid")?,
        email: row.get("email")?,
        created_at_ms: row.get("created_at")?,
    })
}

fn parse_timeline_row(row: &Row<'_>) -> RepoResult<Timeline> {
    let event_count: i64 = row.get("event_count")?;
    Ok(Timeline {
        uuid: parse_uuid(row, "uuid", "timelines.uuid")?,
        name: row.get("name")?,
        created_at_ms: row.get("created_at")?,
        event_count: u32::try_from(event_count).unwrap_or(u32::MAX),
    })
}
