use clap::Parser;

/// Tabbed to-do lists with per-task notes, kept in a local SQLite file.
///
/// Takes no options: the full-screen interface starts immediately.
/// Set HYDROTODO_DB, HYDROTODO_LOG_DIR or HYDROTODO_LOG to override defaults.
#[derive(Parser)]
#[command(name = "hydrotodo", version, about)]
pub struct Cli {}
