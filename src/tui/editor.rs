//! Multiline note editor with a line/column cursor.
//!
//! Columns count characters, not bytes. `lines` is never empty and the cursor
//! always sits on an existing line at a column no greater than its length.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Editing,
    /// Joined text to persist; may legitimately be empty.
    Saved(String),
    /// Leave without touching the stored notes.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct NoteEditor {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    scroll_offset: usize,
    viewport_height: usize,
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(i, _)| i)
}

impl NoteEditor {
    /// Start a session on `text`, cursor at the very end.
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let cursor_line = lines.len() - 1;
        let cursor_col = char_len(&lines[cursor_line]);
        let mut editor = Self {
            lines,
            cursor_line,
            cursor_col,
            scroll_offset: 0,
            viewport_height: 1,
        };
        editor.scroll_to_cursor();
        editor
    }

    /// All lines of the buffer; never empty.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(line, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    /// Index of the first line inside the viewport.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The buffer joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Lines currently inside the viewport.
    pub fn visible_lines(&self) -> &[String] {
        let end = (self.scroll_offset + self.viewport_height).min(self.lines.len());
        &self.lines[self.scroll_offset.min(end)..end]
    }

    /// Record the rows available for text and keep the cursor inside them.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.scroll_offset = self
            .scroll_offset
            .min(self.lines.len().saturating_sub(self.viewport_height));
        self.scroll_to_cursor();
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return EditorAction::Saved(self.text());
            }
            KeyCode::Esc => return EditorAction::Cancelled,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = char_len(&self.lines[self.cursor_line]),
            KeyCode::PageUp => {
                for _ in 0..self.viewport_height {
                    self.move_up();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..self.viewport_height {
                    self.move_down();
                }
            }
            _ => {}
        }
        self.scroll_to_cursor();
        EditorAction::Editing
    }

    /// Insert a printable ASCII character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if !c.is_ascii() || c.is_ascii_control() {
            return;
        }
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        let tail = line.split_off(at);
        self.lines.insert(self.cursor_line + 1, tail);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Delete before the cursor, joining with the previous line at column 0.
    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            let previous = &mut self.lines[self.cursor_line];
            self.cursor_col = char_len(previous);
            previous.push_str(&current);
        }
    }

    /// Delete under the cursor, pulling the next line up at end of line.
    pub fn delete_forward(&mut self) {
        let len = char_len(&self.lines[self.cursor_line]);
        if self.cursor_col < len {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
    }

    /// Move one character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = char_len(&self.lines[self.cursor_line]);
        }
    }

    /// Move one character right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor_col < char_len(&self.lines[self.cursor_line]) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    /// Move to the previous line, keeping the column where possible.
    pub fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.cursor_col.min(char_len(&self.lines[self.cursor_line]));
        }
    }

    /// Move to the next line, keeping the column where possible.
    pub fn move_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = self.cursor_col.min(char_len(&self.lines[self.cursor_line]));
        }
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if self.cursor_line >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.cursor_line + 1 - self.viewport_height;
        }
    }
}
