//! Terminal user interface entry point and setup.

use std::{fs, io, path::Path};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::error::AppResult;
use crate::store::{SqliteStore, TaskStore};
use crate::tui::app::App;

/// Open the task database and run the interface until the user quits.
///
/// The terminal is restored on every exit path, including panics.
pub fn run_tui(db_path: &Path) -> AppResult<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(db_path)?;
    let mut app = App::new(store)?;

    enable_raw_mode()?;
    install_restore_hook();
    let result = run_in_terminal(&mut app);
    let restored = restore_terminal();

    result?;
    restored?;
    info!("event=app_exit module=tui status=ok");
    Ok(())
}

fn run_in_terminal<S: TaskStore>(app: &mut App<S>) -> AppResult<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    app.run(&mut terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Leave raw mode before the panic message is printed.
fn install_restore_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        previous_hook(panic_info);
    }));
}
