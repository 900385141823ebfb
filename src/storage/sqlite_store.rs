// src/storage/sqlite_store.rs

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use super::KeyValueStore;
use crate::db::{get_connection, ConnectionPool};
use crate::error::AppResult;

/// Key-value blobs in the `kv_store` table
pub struct SqliteStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteStore {
    /// The pool must point at an initialized schema (see `db::initialize_database`).
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let conn = get_connection(&self.pool)?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &[u8]) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}
