//! Single-line text entry shown as a wrapped prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::wrap::wrap;

/// What a key press did to a [`LineInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Rows and cursor position for drawing a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLayout {
    pub rows: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// A text buffer that only grows or shrinks at its end.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    pub value: String,
    max_len: Option<usize>,
}

impl LineInput {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input that ignores characters beyond `max_len`.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len: Some(max_len),
        }
    }

    /// Append a printable ASCII character.
    pub fn handle_char(&mut self, c: char) {
        if !c.is_ascii() || c.is_ascii_control() {
            return;
        }
        if self
            .max_len
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return;
        }
        self.value.push(c);
    }

    /// Delete the last character.
    pub fn handle_backspace(&mut self) {
        self.value.pop();
    }

    /// Hand back the buffer, leaving the input empty.
    pub fn submit(&mut self) -> String {
        std::mem::take(&mut self.value)
    }

    /// Throw the buffer away.
    pub fn cancel(&mut self) -> String {
        self.value.clear();
        String::new()
    }

    /// Dispatch one key press. Enter submits and Esc cancels.
    pub fn handle_key(&mut self, key: KeyEvent) -> LineOutcome {
        match key.code {
            KeyCode::Enter => LineOutcome::Submitted(self.submit()),
            KeyCode::Esc => {
                self.cancel();
                LineOutcome::Cancelled
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                LineOutcome::Editing
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.handle_char(c);
                LineOutcome::Editing
            }
            _ => LineOutcome::Editing,
        }
    }

    /// Wrap `prompt + value` to `width` and keep the rows that fit in `max_lines`.
    ///
    /// When the text is longer than the budget the last rows are kept, so the
    /// cursor (always at the end of the text) stays visible.
    pub fn layout(&self, prompt: &str, width: usize, max_lines: usize) -> PromptLayout {
        let max_lines = max_lines.max(1);
        let mut rows = wrap(&format!("{prompt}{}", self.value), width);
        if rows.len() > max_lines {
            rows.drain(..rows.len() - max_lines);
        }
        let cursor_row = (rows.len() - 1).min(max_lines - 1);
        let mut cursor_col = rows[cursor_row].chars().count();
        if width > 0 {
            cursor_col = cursor_col.min(width - 1);
        }
        PromptLayout {
            rows,
            cursor_row,
            cursor_col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> LineInput {
        let mut input = LineInput::new();
        text.chars().for_each(|c| input.handle_char(c));
        input
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("milk");
        input.handle_backspace();
        assert_eq!(input.value, "mil");
        let mut empty = LineInput::new();
        empty.handle_backspace();
        assert_eq!(empty.value, "");
    }

    #[test]
    fn control_and_non_ascii_are_ignored() {
        let input = typed("a\tb\u{e9}c");
        assert_eq!(input.value, "abc");
    }

    #[test]
    fn max_len_caps_input() {
        let mut input = LineInput::with_max_len(3);
        "abcdef".chars().for_each(|c| input.handle_char(c));
        assert_eq!(input.value, "abc");
    }

    #[test]
    fn submit_returns_buffer_and_cancel_discards_it() {
        let mut input = typed("  spaced ");
        assert_eq!(input.submit(), "  spaced ");
        assert_eq!(input.value, "");
        let mut draft = typed("draft");
        assert_eq!(draft.cancel(), "");
        assert_eq!(draft.value, "");
    }

    #[test]
    fn keys_drive_the_session() {
        let mut input = LineInput::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(input.handle_key(key(KeyCode::Char('h'))), LineOutcome::Editing);
        assert_eq!(input.handle_key(key(KeyCode::Char('i'))), LineOutcome::Editing);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_x), LineOutcome::Editing);
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            LineOutcome::Submitted("hi".into())
        );
        assert_eq!(input.value, "");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), LineOutcome::Cancelled);
    }

    #[test]
    fn layout_wraps_prompt_and_value() {
        let layout = typed("buy oat milk").layout("New task: ", 12, 3);
        assert_eq!(
            layout,
            PromptLayout {
                rows: vec!["New task:".into(), "buy oat milk".into()],
                cursor_row: 1,
                cursor_col: 11,
            }
        );
    }

    #[test]
    fn layout_keeps_tail_when_over_budget() {
        let layout = typed("one two three four five").layout("> ", 6, 2);
        assert_eq!(layout.rows, vec!["four".to_string(), "five".to_string()]);
        assert_eq!(layout.cursor_row, 1);
        assert_eq!(layout.cursor_col, 4);
    }

    #[test]
    fn empty_value_puts_cursor_after_prompt() {
        let layout = LineInput::new().layout("Name: ", 20, 1);
        assert_eq!(layout.rows, vec!["Name: ".to_string()]);
        assert_eq!(layout.cursor_col, 6);
    }
}
