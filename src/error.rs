//! Error taxonomy for the book table backends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading or writing the backing file. None of these
/// are recoverable locally; callers attach context and bubble them up.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid tabular data")]
    Csv(#[from] csv::Error),

    #[error("SQLite error")]
    Sqlite(#[from] rusqlite::Error),

    #[error("column {0:?} is missing from the header row")]
    MissingColumn(&'static str),

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
