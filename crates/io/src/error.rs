//! Error types for thermocast-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the thermocast-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a series file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a read or write failure from the `csv` crate, including the
    /// underlying OS error.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more fields are not finite numbers.
    #[error("{count} validation error(s) in {}: {details}", path.display())]
    Validation {
        /// File that was parsed.
        path: PathBuf,
        /// Number of offending fields.
        count: usize,
        /// Human-readable summary of the offending fields.
        details: String,
    },

    /// Returned when a series file holds no observations.
    #[error("series file is empty: {}", path.display())]
    EmptySeries {
        /// File that was parsed.
        path: PathBuf,
    },
}

impl IoError {
    pub(crate) fn csv(path: &std::path::Path, err: csv::Error) -> Self {
        IoError::Csv {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
