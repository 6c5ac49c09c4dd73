//! Application-level error type.

use std::io;

use thiserror::Error;

use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

/// Failures that end the interactive session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
