//! Main application logic for the terminal user interface.
//!
//! `App` owns the open category tabs, the active [`Mode`] and an injected
//! [`TaskStore`]. Every key that writes to storage reloads the affected tab
//! right after, so the cached task lists always mirror what is persisted.
//! Drawing lives in `render.rs`.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use ratatui::{backend::Backend, Terminal};

use crate::error::AppResult;
use crate::store::TaskStore;
use crate::task::{Task, DEFAULT_CATEGORY};
use crate::tui::editor::{EditorAction, NoteEditor};
use crate::tui::enums::{Mode, NotesSession, Prompt, PromptPurpose};
use crate::tui::input::{LineInput, LineOutcome};

/// Most category tabs that can be open at once.
pub const MAX_TABS: usize = 10;
/// Smallest grid the full interface is drawn on.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 30;
/// Longest accepted category name.
pub const MAX_CATEGORY_LEN: usize = 20;

/// One open category with its cached tasks and selection.
#[derive(Debug, Clone)]
pub struct Tab {
    pub category: String,
    pub tasks: Vec<Task>,
    pub selected: usize,
}

impl Tab {
    fn load<S: TaskStore>(store: &S, category: &str) -> AppResult<Self> {
        Ok(Self {
            category: category.to_string(),
            tasks: store.list_tasks(category)?,
            selected: 0,
        })
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }
}

/// Main application state for the terminal user interface.
///
/// `tabs` is never empty and `current` always indexes into it.
pub struct App<S: TaskStore> {
    store: S,
    pub(super) tabs: Vec<Tab>,
    pub(super) current: usize,
    pub(super) mode: Mode,
    pub(super) prompt: Option<Prompt>,
    pub(super) status_message: String,
    /// Grid size seen by the last render, used by the undersized guard.
    pub(super) screen: (u16, u16),
}

impl<S: TaskStore> App<S> {
    /// Load one tab per stored category and start in `Normal` mode.
    pub fn new(store: S) -> AppResult<Self> {
        let mut categories = store.list_categories()?;
        if categories.len() > MAX_TABS {
            warn!(
                "event=tabs_truncated module=tui status=warn found={} kept={MAX_TABS}",
                categories.len()
            );
            categories.truncate(MAX_TABS);
        }
        if categories.is_empty() {
            categories.push(DEFAULT_CATEGORY.to_string());
        }

        let tabs = categories
            .iter()
            .map(|category| Tab::load(&store, category))
            .collect::<AppResult<Vec<_>>>()?;
        info!("event=app_loaded module=tui status=ok tabs={}", tabs.len());

        Ok(Self {
            store,
            tabs,
            current: 0,
            mode: Mode::Normal,
            prompt: None,
            status_message: String::new(),
            screen: (MIN_WIDTH, MIN_HEIGHT),
        })
    }

    pub fn current_tab(&self) -> &Tab {
        &self.tabs[self.current]
    }

    fn current_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.current]
    }

    pub(super) fn is_undersized(&self) -> bool {
        self.screen.0 < MIN_WIDTH || self.screen.1 < MIN_HEIGHT
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Re-read the focused tab from storage and clamp its selection.
    fn reload_current(&mut self) -> AppResult<()> {
        let tab = &mut self.tabs[self.current];
        tab.tasks = self.store.list_tasks(&tab.category)?;
        tab.clamp_selection();
        Ok(())
    }

    /// Handle one key press. Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("event=interrupt module=tui status=ok");
            return Ok(true);
        }
        self.status_message.clear();

        if self.is_undersized() {
            return Ok(key.code == KeyCode::Char('q'));
        }
        if self.prompt.is_some() {
            return self.handle_prompt_input(key);
        }
        match self.mode {
            Mode::Normal => self.handle_normal_input(key),
            Mode::HelpOverlay => Ok(self.handle_help_input(key)),
            Mode::EditingNotes(_) => self.handle_notes_input(key),
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) -> AppResult<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if !ctrl => return Ok(true),
            KeyCode::Char('h') if !ctrl => self.mode = Mode::HelpOverlay,
            KeyCode::Char('t') if ctrl => self.open_prompt(PromptPurpose::NewCategory),
            KeyCode::Char('w') if ctrl => self.close_current_tab()?,
            KeyCode::Left => self.current = self.current.saturating_sub(1),
            KeyCode::Right => self.current = (self.current + 1).min(self.tabs.len() - 1),
            KeyCode::Up => {
                let tab = self.current_tab_mut();
                tab.selected = tab.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let tab = self.current_tab_mut();
                tab.selected = (tab.selected + 1).min(tab.tasks.len().saturating_sub(1));
            }
            KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('a') if !ctrl => self.open_prompt(PromptPurpose::NewTask),
            KeyCode::Char('d') if !ctrl => self.delete_selected()?,
            KeyCode::Char('n') if !ctrl => self.start_notes(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('h') | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
        false
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) -> AppResult<bool> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(false);
        };
        match prompt.input.handle_key(key) {
            LineOutcome::Editing => {}
            LineOutcome::Cancelled => self.prompt = None,
            LineOutcome::Submitted(value) => {
                let purpose = prompt.purpose;
                self.prompt = None;
                match purpose {
                    PromptPurpose::NewTask => self.add_task(&value)?,
                    PromptPurpose::NewCategory => self.open_tab(&value)?,
                }
            }
        }
        Ok(false)
    }

    fn handle_notes_input(&mut self, key: KeyEvent) -> AppResult<bool> {
        let Mode::EditingNotes(session) = &mut self.mode else {
            return Ok(false);
        };
        match session.editor.handle_key(key) {
            EditorAction::Editing => {}
            EditorAction::Saved(text) => {
                let task_id = session.task_id;
                self.mode = Mode::Normal;
                self.store.set_notes(task_id, &text)?;
                debug!("event=notes_saved module=tui status=ok task_id={task_id}");
                self.reload_current()?;
            }
            EditorAction::Cancelled => {
                debug!("event=notes_cancelled module=tui status=ok");
                self.mode = Mode::Normal;
            }
        }
        Ok(false)
    }

    fn open_prompt(&mut self, purpose: PromptPurpose) {
        let input = match purpose {
            PromptPurpose::NewTask => LineInput::new(),
            PromptPurpose::NewCategory => {
                if self.tabs.len() >= MAX_TABS {
                    self.set_status_message(format!("Tab limit reached ({MAX_TABS})"));
                    return;
                }
                LineInput::with_max_len(MAX_CATEGORY_LEN)
            }
        };
        self.prompt = Some(Prompt { purpose, input });
    }

    /// Persist a new task under the focused category and select it.
    fn add_task(&mut self, text: &str) -> AppResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let category = self.current_tab().category.clone();
        self.store.create_task(text, &category)?;
        debug!("event=task_created module=tui status=ok category={category}");

        self.reload_current()?;
        let tab = self.current_tab_mut();
        tab.selected = tab.tasks.len().saturating_sub(1);
        Ok(())
    }

    /// Open (or reopen) a category as a new focused tab.
    fn open_tab(&mut self, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        if self.tabs.iter().any(|tab| tab.category == name) {
            self.set_status_message(format!("Category '{name}' is already open"));
            return Ok(());
        }
        if self.tabs.len() >= MAX_TABS {
            self.set_status_message(format!("Tab limit reached ({MAX_TABS})"));
            return Ok(());
        }

        self.store.clear_tombstone(name)?;
        let tab = Tab::load(&self.store, name)?;
        self.tabs.push(tab);
        self.current = self.tabs.len() - 1;
        info!("event=tab_opened module=tui status=ok category={name}");
        Ok(())
    }

    /// Tombstone the focused category, drop its tasks and remove the tab.
    fn close_current_tab(&mut self) -> AppResult<()> {
        if self.tabs.len() <= 1 {
            self.set_status_message("Cannot close the last tab".to_string());
            return Ok(());
        }
        let category = self.current_tab().category.clone();
        self.store.tombstone_category(&category)?;
        self.store.delete_all_tasks(&category)?;

        self.tabs.remove(self.current);
        self.current = self.current.min(self.tabs.len() - 1);
        info!("event=tab_closed module=tui status=ok category={category}");
        Ok(())
    }

    fn toggle_selected(&mut self) -> AppResult<()> {
        let Some((id, done)) = self.current_tab().selected_task().map(|t| (t.id, t.done)) else {
            return Ok(());
        };
        self.store.set_done(id, !done)?;
        debug!("event=task_toggled module=tui status=ok task_id={id} done={}", !done);
        self.reload_current()
    }

    fn delete_selected(&mut self) -> AppResult<()> {
        let Some(id) = self.current_tab().selected_task().map(|t| t.id) else {
            return Ok(());
        };
        self.store.delete_task(id)?;
        debug!("event=task_deleted module=tui status=ok task_id={id}");
        self.reload_current()
    }

    fn start_notes(&mut self) {
        let Some(task) = self.current_tab().selected_task() else {
            return;
        };
        let session = NotesSession {
            task_id: task.id,
            editor: NoteEditor::new(&task.notes),
        };
        debug!("event=notes_opened module=tui status=ok task_id={}", task.id);
        self.mode = Mode::EditingNotes(session);
    }

    /// Block for the next terminal event and dispatch key presses.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> AppResult<bool> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => Ok(false),
        }
    }

    /// Main event loop: draw, then wait for input.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn store(&self) -> &S {
        &self.store
    }
}
