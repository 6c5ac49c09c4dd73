//! Frame rendering for the terminal user interface.
//!
//! Everything is drawn straight into the frame buffer through the clipped
//! helpers in `draw.rs`, so no layout overflow can panic.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use crate::store::TaskStore;
use crate::task::format_timestamp;
use crate::tui::{
    app::{App, MIN_HEIGHT, MIN_WIDTH},
    colors::{accent, banner, bold, hint},
    draw::{centered, clear_span, draw_box, put_str},
    enums::{Mode, PromptPurpose},
    viewport::compute_window,
    wrap::wrap,
};

const BANNER: [&str; 7] = [
    "██╗  ██╗██╗   ██╗██████╗ ██████╗  ██████╗ ████████╗ ██████╗ ██████╗  ██████╗ ",
    "██║  ██║╚██╗ ██╔╝██╔══██╗██╔══██╗██╔═══██╗╚══██╔══╝██╔═══██╗██╔══██╗██╔═══██╗",
    "███████║ ╚████╔╝ ██║  ██║██████╔╝██║   ██║   ██║   ██║   ██║██║  ██║██║   ██║",
    "██╔══██║  ╚██╔╝  ██║  ██║██╔══██╗██║   ██║   ██║   ██║   ██║██║  ██║██║   ██║",
    "██║  ██║   ██║   ██████╔╝██║  ██║╚██████╔╝   ██║   ╚██████╔╝██████╔╝╚██████╔╝",
    "╚═╝  ╚═╝   ╚═╝   ╚═════╝ ╚═╝  ╚═╝ ╚═════╝    ╚═╝    ╚═════╝ ╚═════╝  ╚═════╝ ",
    "                                                                              ",
];

const HELP_LINES: [&str; 13] = [
    "Available commands:",
    "",
    "↑↓         Navigate between tasks",
    "Enter      Mark/unmark task",
    "a          Add new task",
    "d          Delete selected task",
    "n          Edit task notes",
    "Ctrl+S     Save notes (Esc cancels)",
    "Ctrl+T     New tab",
    "Ctrl+W     Close tab",
    "←/→        Switch tab",
    "h          Show/hide help",
    "q          Quit program",
];

const HELP_HINT: &str = "Press 'h' for help";
const CLOSE_HELP_HINT: &str = "Press 'h' or Esc to close help";
const PROMPT_HINT: &str = "Enter to confirm | Esc to cancel";
const NOTES_HINT: &str = "Ctrl+S to save | Esc to cancel";
const EMPTY_LIST: &str = "No tasks yet...";

/// Rows reserved for a prompt.
const PROMPT_LINES: usize = 2;
const LIST_MAX_WIDTH: u16 = 50;
const DETAIL_MAX_WIDTH: u16 = 60;
const PANEL_GAP: u16 = 2;

fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Regions {
    title: Rect,
    tab_row: u16,
    list: Rect,
    detail: Rect,
}

impl Regions {
    fn compute(width: u16, height: u16, task_count: usize) -> Self {
        let banner_width = BANNER.iter().map(|l| text_width(l)).max().unwrap_or(0);
        let mut title_w = u16::try_from(banner_width + 4).unwrap_or(u16::MAX);
        if title_w > width {
            title_w = width.saturating_sub(2);
        }
        let title_h = (BANNER.len() as u16 + 2).min(height.saturating_sub(2));
        let title = Rect::new(width.saturating_sub(title_w) / 2, 1, title_w, title_h);

        let tab_row = title.y + title.height;
        let wanted = u16::try_from(task_count.saturating_add(5))
            .unwrap_or(u16::MAX)
            .max(10);
        let box_h = wanted.min(height.saturating_sub(title_h + 7));

        let avail = width.saturating_sub(4);
        let list_w = LIST_MAX_WIDTH.min(avail.saturating_sub(PANEL_GAP) * 3 / 5);
        let detail_w = DETAIL_MAX_WIDTH.min(avail.saturating_sub(PANEL_GAP + list_w));
        let list_x = width.saturating_sub(list_w + PANEL_GAP + detail_w) / 2;
        let box_y = tab_row + 2;

        Self {
            title,
            tab_row,
            list: Rect::new(list_x, box_y, list_w, box_h),
            detail: Rect::new(list_x + list_w + PANEL_GAP, box_y, detail_w, box_h),
        }
    }
}

impl<S: TaskStore> App<S> {
    /// Draw the whole interface for the current state.
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.screen = (area.width, area.height);
        if self.is_undersized() {
            render_undersized(f.buffer_mut(), area);
            return;
        }

        let regions = Regions::compute(area.width, area.height, self.current_tab().tasks.len());
        let buf = f.buffer_mut();
        render_banner(buf, area, regions.title);

        let mut cursor = None;
        if matches!(self.mode, Mode::HelpOverlay) {
            render_help(buf, area);
        } else {
            self.render_tab_bar(buf, area.width, regions.tab_row);
            self.render_task_list(buf, regions.list);
            cursor = self.render_details(buf, regions.detail);
        }
        if let Some(prompt_cursor) = self.render_prompt(buf, area, regions.list) {
            cursor = Some(prompt_cursor);
        }
        self.render_hint(buf, area);

        if let Some(position) = cursor {
            f.set_cursor_position(position);
        }
    }

    fn render_tab_bar(&self, buf: &mut Buffer, width: u16, row: u16) {
        let bar = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == self.current {
                    format!("╭─[{}]─╮", tab.category)
                } else {
                    format!("  {}  ", tab.category)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let x = centered(width, text_width(&bar));
        put_str(buf, x, row, &bar, usize::from(width), accent());
    }

    fn render_task_list(&self, buf: &mut Buffer, rect: Rect) {
        draw_box(buf, rect.x, rect.y, rect.height, rect.width, Style::default());
        let tab = self.current_tab();
        let inner_w = usize::from(rect.width.saturating_sub(4));

        if tab.tasks.is_empty() {
            let x = rect.x + centered(rect.width, text_width(EMPTY_LIST));
            put_str(buf, x, rect.y + rect.height / 2, EMPTY_LIST, inner_w, accent());
            return;
        }

        let max_visible = usize::from(rect.height.saturating_sub(4)).max(1);
        let (start, end) = compute_window(tab.tasks.len(), tab.selected, max_visible);
        for (row, index) in (start..end).enumerate() {
            let style = if index == tab.selected {
                accent()
            } else {
                Style::default()
            };
            let y = rect.y + 2 + row as u16;
            put_str(buf, rect.x + 2, y, &tab.tasks[index].list_line(), inner_w, style);
        }

        let indicator_x = (rect.x + rect.width).saturating_sub(3);
        if start > 0 {
            put_str(buf, indicator_x, rect.y + 1, "↑", 1, accent());
        }
        if end < tab.tasks.len() {
            put_str(buf, indicator_x, (rect.y + rect.height).saturating_sub(2), "↓", 1, accent());
        }
    }

    /// Draw the side panel. Returns the editor cursor while notes are open.
    fn render_details(&mut self, buf: &mut Buffer, rect: Rect) -> Option<(u16, u16)> {
        draw_box(buf, rect.x, rect.y, rect.height, rect.width, Style::default());
        let inner_x = rect.x + 2;
        let inner_w = usize::from(rect.width.saturating_sub(4));
        let top = rect.y + 1;
        let rows = usize::from(rect.height.saturating_sub(2));
        if inner_w == 0 || rows == 0 {
            return None;
        }

        if let Mode::EditingNotes(session) = &mut self.mode {
            let editor = &mut session.editor;
            editor.set_viewport_height(rows);
            let (line, col) = editor.cursor();
            let title = format!(" Notes (editing) {}/{} ", line + 1, editor.lines().len());
            put_str(buf, inner_x, rect.y, &title, inner_w, hint());
            let shift = horizontal_shift(col, inner_w);
            for (i, line) in editor.visible_lines().iter().enumerate() {
                let shown: String = line.chars().skip(shift).collect();
                put_str(buf, inner_x, top + i as u16, &shown, inner_w, Style::default());
            }
            let row = line.saturating_sub(editor.scroll_offset()).min(rows - 1);
            let col = (col - shift).min(inner_w - 1);
            return Some((inner_x + col as u16, top + row as u16));
        }

        put_str(buf, inner_x, rect.y, " Details ", inner_w, hint());
        let Some(task) = self.current_tab().selected_task() else {
            put_str(buf, inner_x, top, "Nothing selected", inner_w, Style::default());
            return None;
        };

        let mut lines: Vec<(String, Style)> = wrap(&task.text, inner_w)
            .into_iter()
            .map(|line| (line, bold()))
            .collect();
        let status = if task.done { "done" } else { "open" };
        lines.push((format!("Status: {status}"), Style::default()));
        lines.push((
            format!("Created: {}", format_timestamp(task.created_at)),
            Style::default(),
        ));
        lines.push((String::new(), Style::default()));
        lines.push(("Notes:".to_string(), hint()));
        if task.notes.is_empty() {
            lines.push(("(none, press n to edit)".to_string(), Style::default()));
        } else {
            for note_line in task.notes.split('\n') {
                lines.extend(
                    wrap(note_line, inner_w)
                        .into_iter()
                        .map(|line| (line, Style::default())),
                );
            }
        }

        let mut body_rows = rows;
        if task.note_updated_at.is_some() {
            body_rows -= 1;
            let updated = format!("Updated: {}", format_timestamp(task.note_updated_at));
            put_str(buf, inner_x, top + body_rows as u16, &updated, inner_w, Style::default());
        }
        for (i, (line, style)) in lines.iter().take(body_rows).enumerate() {
            put_str(buf, inner_x, top + i as u16, line, inner_w, *style);
        }
        None
    }

    /// Draw the open prompt, if any, and return its cursor.
    fn render_prompt(&self, buf: &mut Buffer, area: Rect, list: Rect) -> Option<(u16, u16)> {
        let prompt = self.prompt.as_ref()?;
        let (x, first_row, width) = match prompt.purpose {
            PromptPurpose::NewTask => (
                list.x + 2,
                (list.y + list.height).saturating_sub(1 + PROMPT_LINES as u16),
                list.width.saturating_sub(4),
            ),
            PromptPurpose::NewCategory => (
                2,
                area.height.saturating_sub(4),
                area.width.saturating_sub(4),
            ),
        };

        for row in 0..PROMPT_LINES as u16 {
            clear_span(buf, x, first_row + row, width);
        }
        let layout = prompt
            .input
            .layout(prompt.purpose.label(), usize::from(width), PROMPT_LINES);
        for (i, row) in layout.rows.iter().enumerate() {
            put_str(buf, x, first_row + i as u16, row, usize::from(width), bold());
        }
        Some((
            x + layout.cursor_col as u16,
            first_row + layout.cursor_row as u16,
        ))
    }

    fn render_hint(&self, buf: &mut Buffer, area: Rect) {
        let (text, style) = if !self.status_message.is_empty() {
            (self.status_message.as_str(), accent())
        } else if self.prompt.is_some() {
            (PROMPT_HINT, hint())
        } else {
            match self.mode {
                Mode::Normal => (HELP_HINT, hint()),
                Mode::HelpOverlay => (CLOSE_HELP_HINT, hint()),
                Mode::EditingNotes(_) => (NOTES_HINT, hint()),
            }
        };
        let x = centered(area.width, text_width(text));
        put_str(buf, x, area.height.saturating_sub(2), text, usize::from(area.width), style);
    }
}

/// Columns to scroll the editor left so cursor column `col` fits in `width`.
fn horizontal_shift(col: usize, width: usize) -> usize {
    (col + 1).saturating_sub(width)
}

fn render_undersized(buf: &mut Buffer, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let msg = format!(
        "Current resolution: {}x{} | Minimum: {MIN_WIDTH}x{MIN_HEIGHT}",
        area.width, area.height
    );
    let x = centered(area.width, text_width(&msg)).min(area.width - 1);
    let y = (area.height / 2).min(area.height - 1);
    put_str(buf, x, y, &msg, usize::from(area.width - x), accent());
}

fn render_banner(buf: &mut Buffer, area: Rect, title: Rect) {
    if title.y + title.height >= area.height || title.x + title.width >= area.width {
        return;
    }
    draw_box(buf, title.x, title.y, title.height, title.width, Style::default());
    let room = usize::from(title.width.saturating_sub(4));
    for (i, line) in BANNER.iter().enumerate() {
        put_str(buf, title.x + 2, title.y + 1 + i as u16, line, room, banner());
    }
}

/// Help box, centred horizontally and pushed a little below the middle.
fn render_help(buf: &mut Buffer, area: Rect) {
    let help_w = HELP_LINES.iter().map(|l| text_width(l)).max().unwrap_or(0) + 4;
    let help_h = HELP_LINES.len() as u16 + 2;
    let x = centered(area.width, help_w);
    let y = (area.height.saturating_sub(help_h) / 2 + area.height / 10).max(2);

    draw_box(buf, x, y, help_h, help_w as u16, Style::default());
    for (i, line) in HELP_LINES.iter().enumerate() {
        put_str(buf, x + 2, y + 1 + i as u16, line, help_w - 4, accent());
    }
}
