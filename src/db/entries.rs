use anyhow::Result;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::warn;

use crate::core::store::Persistence;
use crate::models::entry::WeightEntry;

use super::Database;

pub const ENTRIES_KEY: &str = "entries";

impl Database {
    pub fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blob = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(blob)
    }

    pub fn put_blob(&self, key: &str, value: &[u8]) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl Persistence for Database {
    /// An absent or undecodable blob loads as no entries.
    fn load(&self) -> Result<Vec<WeightEntry>> {
        let Some(blob) = self.get_blob(ENTRIES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&blob) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(error = %e, "stored entries are unreadable; ignoring them");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[WeightEntry]) -> Result<()> {
        let blob = serde_json::to_vec(entries)?;
        self.put_blob(ENTRIES_KEY, &blob)
    }
}
