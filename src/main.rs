//! # HydroToDo
//!
//! A full-screen terminal to-do list organised into category tabs.
//!
//! ## Key Features
//!
//! - **Category tabs**: up to ten open categories, created with `Ctrl+T` and
//!   closed (together with their tasks) with `Ctrl+W`
//! - **Per-task notes**: a multiline editor opened with `n`, saved with `Ctrl+S`
//! - **Local storage**: a single SQLite file, upgraded in place by versioned migrations
//!
//! ## Configuration
//!
//! - `HYDROTODO_DB` - database file (default `~/.hydrotodo.db`)
//! - `HYDROTODO_LOG_DIR` - log directory (default `~/.hydrotodo/logs`)
//! - `HYDROTODO_LOG` - log level (`trace`, `debug`, `info`, `warn`, `error`)
//!
//! The interface needs a terminal of at least 80x30; press `h` inside it for
//! the key list and `q` to quit.

use clap::Parser;
use log::error;

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod draw;
    pub mod editor;
    pub mod enums;
    pub mod input;
    pub mod render;
    pub mod run;
    pub mod viewport;
    pub mod wrap;
}

use cli::Cli;
use config::AppConfig;

fn main() {
    let _cli = Cli::parse();
    let config = AppConfig::from_env();

    let logger = match logging::init_logging(&config.log_level, &config.log_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {e}; continuing without log files");
            None
        }
    };

    if let Err(e) = tui::run::run_tui(&config.db_path) {
        error!("event=app_exit module=main status=error error={e}");
        if let Some(handle) = &logger {
            handle.flush();
        }
        eprintln!("hydrotodo: {e}");
        std::process::exit(1);
    }
}
