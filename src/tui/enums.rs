//! Enumerations for TUI state management.

use crate::task::TaskId;
use crate::tui::editor::NoteEditor;
use crate::tui::input::LineInput;

/// Top-level application mode. Exactly one is active at a time.
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    HelpOverlay,
    EditingNotes(NotesSession),
}

/// A note editing session bound to one task.
#[derive(Debug, Clone)]
pub struct NotesSession {
    pub task_id: TaskId,
    pub editor: NoteEditor,
}

/// What an open line prompt will create on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    NewTask,
    NewCategory,
}

impl PromptPurpose {
    pub fn label(self) -> &'static str {
        match self {
            PromptPurpose::NewTask => "New task: ",
            PromptPurpose::NewCategory => "New category name: ",
        }
    }
}

/// An open line prompt: its purpose plus the text typed so far.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub purpose: PromptPurpose,
    pub input: LineInput,
}
