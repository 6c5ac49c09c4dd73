//! SQLite connection bootstrap and schema migrations.
//!
//! Connections handed out by this module have every migration applied;
//! nothing reads or writes task rows before that.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info};
use rusqlite::Connection;
use thiserror::Error;

pub mod migrations;

use migrations::apply_migrations;

pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while opening or migrating the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}

/// Open a database file, creating it if needed, and apply pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file path={}", path.display());

    let conn = Connection::open(path).map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        DbError::from(err)
    })?;
    finish_open(conn, "file", started_at)
}

/// Open a private in-memory database with the full schema.
#[cfg(test)]
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");
    let conn = Connection::open_in_memory()?;
    finish_open(conn, "memory", started_at)
}

fn finish_open(mut conn: Connection, mode: &str, started_at: Instant) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::latest_version;

    fn schema_version(conn: &Connection) -> u32 {
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap()
    }

    fn columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table});"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn in_memory_database_gets_full_schema() {
        let conn = open_db_in_memory().unwrap();
        assert_eq!(schema_version(&conn), latest_version());
        let cols = columns(&conn, "todos");
        for expected in ["id", "text", "done", "category", "notes", "created_at", "note_updated_at"] {
            assert!(cols.iter().any(|c| c == expected), "missing column {expected}");
        }
        assert_eq!(columns(&conn, "deleted_categories"), vec!["name".to_string()]);
    }

    #[test]
    fn opening_same_file_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");

        let first = open_db(&path).unwrap();
        first
            .execute("INSERT INTO todos (text, category) VALUES ('keep me', 'Home')", [])
            .unwrap();
        drop(first);

        let second = open_db(&path).unwrap();
        assert_eq!(schema_version(&second), latest_version());
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn legacy_table_is_upgraded_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.db");

        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO todos (text, done) VALUES ('old task', 1);",
        )
        .unwrap();
        drop(conn);

        let conn = open_db(&path).unwrap();
        let (category, notes, created_at, note_updated_at, done): (
            String,
            String,
            Option<i64>,
            Option<i64>,
            bool,
        ) = conn
            .query_row(
                "SELECT category, notes, created_at, note_updated_at, done FROM todos",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .unwrap();
        assert_eq!(category, "General");
        assert_eq!(notes, "");
        assert_eq!(created_at, None);
        assert_eq!(note_updated_at, None);
        assert!(done);
    }

    #[test]
    fn newer_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.db");

        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 999;").unwrap();
        drop(conn);

        match open_db(&path).unwrap_err() {
            DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => {
                assert_eq!(db_version, 999);
                assert_eq!(latest_supported, latest_version());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
