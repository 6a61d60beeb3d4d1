//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate records before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod event_repo;
pub mod journal_repo;
pub mod photo_repo;
pub mod recording_repo;
pub mod settings_repo;
pub mod timeline_repo;

use crate::model::event::TimelineId;
use event_repo::{RepoError, RepoResult};
use rusqlite::{Connection, Row};
use uuid::Uuid;

pub(crate) fn parse_uuid(row: &Row<'_>, column: &str, label: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {label}")))
}

pub(crate) fn bool_exists(conn: &Connection, sql: &str, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(sql, [id.to_string()], |row| row.get(0))?;
    Ok(exists == 1)
}

pub(crate) fn timeline_exists(conn: &Connection, id: TimelineId) -> RepoResult<bool> {
    bool_exists(
        conn,
        "SELECT EXISTS(SELECT 1 FROM timelines WHERE uuid = ?1);",
        id,
    )
}
