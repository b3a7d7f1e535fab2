//! Timetable loading error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur when loading a timetable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON does not have the timetable shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The timetable parsed but failed validation
    #[error("invalid timetable: {0}")]
    Invalid(#[from] DomainError),
}
