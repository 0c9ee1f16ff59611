//! CLI error type.

use quotedesk_core::{FormErrors, StorageError, StoreError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage could not be opened or read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A store operation was refused.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Quote form failed validation.
    #[error("Invalid quote: {0}")]
    InvalidForm(#[from] FormErrors),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
