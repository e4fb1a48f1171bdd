//! Error types for board operations
//!
//! Every error that can cross the boundary to the UI layer lives here. None of
//! them is fatal to the session: the caller reports and carries on.

use crate::types::TabId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or editing a board
#[derive(Error, Debug)]
pub enum BoardError {
    /// Document failed validation on load (the in-memory document is kept)
    #[error("Invalid board: {0}")]
    Validation(String),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An item's backing file could not be found
    #[error("Resource not found: {}", .0.display())]
    ResourceMissing(PathBuf),

    /// Read or write failure at the persistence boundary
    #[error("I/O error on {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Save requested before a save folder was chosen
    #[error("No save location set")]
    NoSaveLocation,

    /// Attempt to delete the only remaining tab
    #[error("The last tab cannot be deleted")]
    LastTab,

    /// Tab id does not exist in the document
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),
}

impl BoardError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BoardError::Persistence {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors from reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
