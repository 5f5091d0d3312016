// Error taxonomy shared by the scrape pipeline.
//
// Per-row parse problems never surface here (rows are dropped); these are the
// failures a caller has to decide about.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FfmError {
    /// Fetched data was missing or empty where a result was required.
    #[error("no data: {0}")]
    DataValidation(String),

    /// CSV or other file I/O failed.
    #[error("file operation failed for {path}: {message}")]
    FileOperation { path: PathBuf, message: String },

    /// The page source rejected our session.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The page source could not produce markup for a location.
    #[error("failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    /// A source name that the dispatcher does not know about.
    #[error("unknown source `{0}`")]
    UnknownSource(String),
}

impl FfmError {
    pub(crate) fn file(path: &Path, err: impl std::fmt::Display) -> Self {
        FfmError::FileOperation {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn fetch(location: impl Into<String>, err: impl std::fmt::Display) -> Self {
        FfmError::Fetch {
            location: location.into(),
            message: err.to_string(),
        }
    }
}
