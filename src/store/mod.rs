//! Task storage contract.
//!
//! The UI talks to persistence only through [`TaskStore`], which keeps the
//! state machine independent of SQLite and lets tests swap in [`MemoryStore`].

use thiserror::Error;

use crate::db::DbError;
use crate::task::{Task, TaskId};

#[cfg(test)]
pub(crate) mod contract;
#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// CRUD operations over tasks, categories and the tombstone set.
pub trait TaskStore {
    /// Category names in first-seen order, without tombstoned names.
    /// Returns `["General"]` when nothing is left.
    fn list_categories(&self) -> StoreResult<Vec<String>>;
    /// Tasks of one category in stable load order.
    fn list_tasks(&self, category: &str) -> StoreResult<Vec<Task>>;
    /// Insert a new open task; the store stamps `created_at`.
    fn create_task(&mut self, text: &str, category: &str) -> StoreResult<()>;
    fn set_done(&mut self, id: TaskId, done: bool) -> StoreResult<()>;
    /// Overwrite notes and advance `note_updated_at`.
    fn set_notes(&mut self, id: TaskId, notes: &str) -> StoreResult<()>;
    fn delete_task(&mut self, id: TaskId) -> StoreResult<()>;
    fn delete_all_tasks(&mut self, category: &str) -> StoreResult<()>;
    fn tombstone_category(&mut self, name: &str) -> StoreResult<()>;
    fn clear_tombstone(&mut self, name: &str) -> StoreResult<()>;
    /// Tombstoned names, sorted.
    fn tombstones(&self) -> StoreResult<Vec<String>>;
}

/// Next notes timestamp: wall clock, but strictly after the previous value.
pub(crate) fn next_note_stamp(now: i64, previous: Option<i64>) -> i64 {
    match previous {
        Some(prev) if prev >= now => prev + 1,
        _ => now,
    }
}
