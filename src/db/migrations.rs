// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Idempotent operations

use rusqlite::Connection;
use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

const INITIAL_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL
);

-- Key-value blobs (one whole collection per key)
CREATE TABLE IF NOT EXISTS kv_store (
    key         TEXT PRIMARY KEY,
    value       BLOB NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Relational recipe storage; position keeps insertion order
CREATE TABLE IF NOT EXISTS recipes (
    id          TEXT PRIMARY KEY,
    position    INTEGER NOT NULL,
    name        TEXT NOT NULL,
    ingredients TEXT NOT NULL,
    procedure   TEXT NOT NULL,
    image_data  BLOB
);

CREATE INDEX IF NOT EXISTS idx_recipes_position ON recipes(position);

-- Marks collections that have been written at least once
CREATE TABLE IF NOT EXISTS collection_meta (
    name        TEXT PRIMARY KEY,
    written_at  TEXT NOT NULL
);
";

/// Initialize the database schema
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, 1)?;
        log::info!("Initialized database schema v{}", CURRENT_SCHEMA_VERSION);
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(
            format!("Schema version {} is outdated. Expected {}. Manual migration required.",
                current_version, CURRENT_SCHEMA_VERSION)
        ));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(
            format!("Schema version {} is newer than supported {}. Update the application.",
                current_version, CURRENT_SCHEMA_VERSION)
        ));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(INITIAL_SCHEMA)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!("Database integrity check failed: {}", result)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_fresh_database() {
        let conn = test_connection();
        initialize_database(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = test_connection();
        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = test_connection();
        initialize_database(&conn).unwrap();
        set_schema_version(&conn, CURRENT_SCHEMA_VERSION + 1).unwrap();
        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_integrity_check() {
        let conn = test_connection();
        initialize_database(&conn).unwrap();
        verify_database_integrity(&conn).unwrap();
    }
}
