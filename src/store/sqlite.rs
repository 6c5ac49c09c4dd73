//! SQLite-backed [`TaskStore`].

use std::path::Path;

use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{next_note_stamp, StoreError, StoreResult, TaskStore};
use crate::db::open_db;
use crate::task::{Task, TaskId, DEFAULT_CATEGORY};

const TASK_COLUMNS: &str = "id, text, done, category, notes, created_at, note_updated_at";

/// Task store over a migrated SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Throwaway in-memory database with the full schema.
    #[cfg(test)]
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: crate::db::open_db_in_memory()?,
        })
    }

    fn ensure_changed(changed: usize, id: TaskId) -> StoreResult<()> {
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        text: row.get("text")?,
        done: row.get("done")?,
        category: row.get("category")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        note_updated_at: row.get("note_updated_at")?,
    })
}

impl TaskStore for SqliteStore {
    fn list_categories(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT category
             FROM todos
             WHERE category NOT IN (SELECT name FROM deleted_categories)
             GROUP BY category
             ORDER BY MIN(id);",
        )?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if categories.is_empty() {
            return Ok(vec![DEFAULT_CATEGORY.to_string()]);
        }
        Ok(categories)
    }

    fn list_tasks(&self, category: &str) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM todos WHERE category = ?1 ORDER BY id;"
        ))?;
        let tasks = stmt
            .query_map([category], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn create_task(&mut self, text: &str, category: &str) -> StoreResult<()> {
        let now = Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT INTO todos (text, done, category, notes, created_at)
             VALUES (?1, 0, ?2, '', ?3);",
            params![text, category, now],
        )?;
        debug!(
            "event=task_create module=store status=ok id={} category={}",
            self.conn.last_insert_rowid(),
            category
        );
        Ok(())
    }

    fn set_done(&mut self, id: TaskId, done: bool) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("UPDATE todos SET done = ?2 WHERE id = ?1;", params![id, done])?;
        Self::ensure_changed(changed, id)
    }

    fn set_notes(&mut self, id: TaskId, notes: &str) -> StoreResult<()> {
        let previous: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT note_updated_at FROM todos WHERE id = ?1;",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(previous) = previous else {
            return Err(StoreError::NotFound(id));
        };

        let stamp = next_note_stamp(Utc::now().timestamp_millis(), previous);
        let changed = self.conn.execute(
            "UPDATE todos SET notes = ?2, note_updated_at = ?3 WHERE id = ?1;",
            params![id, notes, stamp],
        )?;
        debug!(
            "event=task_notes module=store status=ok id={} bytes={}",
            id,
            notes.len()
        );
        Self::ensure_changed(changed, id)
    }

    fn delete_task(&mut self, id: TaskId) -> StoreResult<()> {
        let changed = self.conn.execute("DELETE FROM todos WHERE id = ?1;", [id])?;
        Self::ensure_changed(changed, id)
    }

    fn delete_all_tasks(&mut self, category: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE category = ?1;", [category])?;
        debug!(
            "event=category_purge module=store status=ok category={} removed={}",
            category, removed
        );
        Ok(())
    }

    fn tombstone_category(&mut self, name: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO deleted_categories (name) VALUES (?1);",
            [name],
        )?;
        Ok(())
    }

    fn clear_tombstone(&mut self, name: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM deleted_categories WHERE name = ?1;", [name])?;
        Ok(())
    }

    fn tombstones(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM deleted_categories ORDER BY name;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}
