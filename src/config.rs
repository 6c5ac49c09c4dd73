//! Runtime configuration resolved from the environment.

use std::path::PathBuf;

use crate::logging::default_log_level;

pub const DB_ENV: &str = "HYDROTODO_DB";
pub const LOG_DIR_ENV: &str = "HYDROTODO_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "HYDROTODO_LOG";

const DB_FILE_NAME: &str = ".hydrotodo.db";
const LOG_DIR_NAME: &str = ".hydrotodo/logs";

/// Where data and logs live, and how verbose logging is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Without `HOME`, paths are relative to the
    /// current directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let home = var("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

        Self {
            db_path: var(DB_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(DB_FILE_NAME)),
            log_dir: var(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(LOG_DIR_NAME)),
            log_level: var(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}
