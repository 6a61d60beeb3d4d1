//! Timeline store bootstrap.
//!
//! A store is one SQLite file (or an in-memory database in tests) holding
//! timelines, their events and every attachment. Opening a store always
//! brings its schema up to date before a connection is handed out.
//!
//! # Invariants
//! - The schema revision lives in `PRAGMA user_version`.
//! - A store written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or upgrade a timeline store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The directory meant to hold the store file could not be created.
    StoreDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The store carries a schema revision this build does not know.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Whether retrying with a newer build could succeed.
    pub fn needs_newer_build(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "timeline store error: {err}"),
            Self::StoreDir { path, source } => write!(
                f,
                "cannot create timeline store directory `{}`: {source}",
                path.display()
            ),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "timeline store uses schema v{found}; this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::StoreDir { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
