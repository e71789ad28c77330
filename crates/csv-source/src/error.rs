//! Error types for csv-import-source crate.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while streaming records. Reaching the end of the last file is not an error.
#[derive(Error, Debug)]
pub enum FilesReaderError {
    #[error("Failed to set up storage backends")]
    Backend(#[source] BoxError),

    #[error("Failed to open {location}")]
    Open {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to read CSV record from {location}")]
    Record {
        location: String,
        #[source]
        source: csv::Error,
    },

    #[error("Stream already failed at {location}")]
    Aborted { location: String },
}

impl FilesReaderError {
    pub(crate) fn open(location: &str, err: anyhow::Error) -> Self {
        FilesReaderError::Open {
            location: location.to_string(),
            source: err.into(),
        }
    }

    /// Location of the file the error came from, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            FilesReaderError::Backend(_) => None,
            FilesReaderError::Open { location, .. }
            | FilesReaderError::Record { location, .. }
            | FilesReaderError::Aborted { location } => Some(location),
        }
    }
}

/// Result type alias for csv-import-source operations.
pub type Result<T> = std::result::Result<T, FilesReaderError>;
