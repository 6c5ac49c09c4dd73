//! In-memory [`TaskStore`] used by the state-machine tests.

use std::collections::BTreeSet;

use chrono::Utc;

use super::{next_note_stamp, StoreError, StoreResult, TaskStore};
use crate::task::{Task, TaskId, DEFAULT_CATEGORY};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    tombstones: BTreeSet<String>,
    next_id: TaskId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn task_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl TaskStore for MemoryStore {
    fn list_categories(&self) -> StoreResult<Vec<String>> {
        let mut seen: Vec<String> = Vec::new();
        for task in &self.tasks {
            if !self.tombstones.contains(&task.category) && !seen.contains(&task.category) {
                seen.push(task.category.clone());
            }
        }
        if seen.is_empty() {
            seen.push(DEFAULT_CATEGORY.to_string());
        }
        Ok(seen)
    }

    fn list_tasks(&self, category: &str) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect())
    }

    fn create_task(&mut self, text: &str, category: &str) -> StoreResult<()> {
        self.next_id += 1;
        self.tasks.push(Task {
            id: self.next_id,
            text: text.to_string(),
            done: false,
            category: category.to_string(),
            notes: String::new(),
            created_at: Some(Utc::now().timestamp_millis()),
            note_updated_at: None,
        });
        Ok(())
    }

    fn set_done(&mut self, id: TaskId, done: bool) -> StoreResult<()> {
        self.task_mut(id)?.done = done;
        Ok(())
    }

    fn set_notes(&mut self, id: TaskId, notes: &str) -> StoreResult<()> {
        let task = self.task_mut(id)?;
        task.notes = notes.to_string();
        task.note_updated_at = Some(next_note_stamp(
            Utc::now().timestamp_millis(),
            task.note_updated_at,
        ));
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> StoreResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all_tasks(&mut self, category: &str) -> StoreResult<()> {
        self.tasks.retain(|t| t.category != category);
        Ok(())
    }

    fn tombstone_category(&mut self, name: &str) -> StoreResult<()> {
        self.tombstones.insert(name.to_string());
        Ok(())
    }

    fn clear_tombstone(&mut self, name: &str) -> StoreResult<()> {
        self.tombstones.remove(name);
        Ok(())
    }

    fn tombstones(&self) -> StoreResult<Vec<String>> {
        Ok(self.tombstones.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[test]
    fn memory_store_honours_contract() {
        contract::run_all(|| Ok(MemoryStore::new()));
    }
}
