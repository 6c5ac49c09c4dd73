//! Task data structure and display helpers.
//!
//! A `Task` is one to-do item belonging to exactly one category. Timestamps are
//! stored as UTC epoch milliseconds and shown in local time.

use chrono::{DateTime, Local};

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// Category used when storage holds no visible categories at all.
pub const DEFAULT_CATEGORY: &str = "General";

/// A to-do item with its free-form notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    pub category: String,
    pub notes: String,
    pub created_at: Option<i64>,
    pub note_updated_at: Option<i64>,
}

impl Task {
    /// List prefix showing completion state.
    pub fn checkbox(&self) -> &'static str {
        if self.done {
            "[X] "
        } else {
            "[ ] "
        }
    }

    /// The row shown in the task list.
    pub fn list_line(&self) -> String {
        format!("{}{}", self.checkbox(), self.text)
    }
}

/// Format an epoch-millisecond timestamp in local time, or "-" when unset.
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(done: bool) -> Task {
        Task {
            id: 1,
            text: "buy milk".into(),
            done,
            category: DEFAULT_CATEGORY.into(),
            notes: String::new(),
            created_at: None,
            note_updated_at: None,
        }
    }

    #[test]
    fn list_line_shows_checkbox() {
        assert_eq!(task(false).list_line(), "[ ] buy milk");
        assert_eq!(task(true).list_line(), "[X] buy milk");
    }

    #[test]
    fn missing_timestamp_renders_dash() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some(0)).len(), "1970-01-01 00:00".len());
    }
}
