//! Database operations for the dictionary application
//!
//! The application keeps a single key-value table. Only the bookmark list is
//! stored in it, serialized as one JSON array under [`BOOKMARKS_KEY`].

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use thiserror::Error;

/// Key holding the serialized bookmark list
pub const BOOKMARKS_KEY: &str = "bookmarks";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database connection is poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Opens (or creates) the SQLite database at `path` and ensures the schema exists
pub fn init_database<P: AsRef<Path>>(path: P) -> StorageResult<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Creates an in-memory database with the same schema
pub fn init_in_memory() -> StorageResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads the raw value stored under `key`, `None` if the key was never written
pub fn get_app_value(key: &str, conn: &Connection) -> StorageResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Overwrites the value stored under `key`
pub fn set_app_value(key: &str, value: &str, conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let conn = init_in_memory().unwrap();
        assert_eq!(get_app_value(BOOKMARKS_KEY, &conn).unwrap(), None);
    }

    #[test]
    fn test_set_then_overwrite() {
        let conn = init_in_memory().unwrap();
        set_app_value(BOOKMARKS_KEY, "[\"cat\"]", &conn).unwrap();
        set_app_value(BOOKMARKS_KEY, "[\"cat\",\"dog\"]", &conn).unwrap();

        assert_eq!(
            get_app_value(BOOKMARKS_KEY, &conn).unwrap().as_deref(),
            Some("[\"cat\",\"dog\"]")
        );
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_state", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite3");

        {
            let conn = init_database(&path).unwrap();
            set_app_value(BOOKMARKS_KEY, "[\"serendipity\"]", &conn).unwrap();
        }

        let conn = init_database(&path).unwrap();
        assert_eq!(
            get_app_value(BOOKMARKS_KEY, &conn).unwrap().as_deref(),
            Some("[\"serendipity\"]")
        );
    }
}
