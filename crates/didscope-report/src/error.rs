//! Error types for report generation and CSV import.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing report files.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input held no cell that looks like a phone number
    #[error("No valid phone numbers found in CSV")]
    NoPhoneNumbers,

    /// File could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
