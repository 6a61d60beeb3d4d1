//! User settings persistence as a single JSON row.
//!
//! # Invariants
//! - At most one settings row exists (`id = 1`).
//! - A missing row reads back as `UserSettings::default()`.

use crate::model::settings::UserSettings;
use crate::repo::event_repo::{RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension};

pub trait SettingsRepository {
    fn load_settings(&self) -> RepoResult<UserSettings>;
    fn save_settings(&self, settings: &UserSettings) -> RepoResult<()>;
}

pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load_settings(&self) -> RepoResult<UserSettings> {
        let payload: Option<String> = self
            .conn
            .query_row("SELECT payload FROM user_settings WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;

        match payload {
            Some(text) => serde_json::from_str(&text).map_err(|err| {
                RepoError::InvalidData(format!("invalid user_settings.payload: {err}"))
            }),
            None => Ok(UserSettings::default()),
        }
    }

    fn save_settings(&self, settings: &UserSettings) -> RepoResult<()> {
        let payload = serde_json::to_string(settings)
            .map_err(|err| RepoError::InvalidData(format!("unserializable settings: {err}")))?;
        self.conn.execute(
            "INSERT INTO user_settings (id, payload) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            [payload],
        )?;
        Ok(())
    }
}
