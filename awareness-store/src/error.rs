//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing stored files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Errors raised while loading a search-term list.
#[derive(Debug, Error)]
pub enum TermsError {
    /// The file extension is not one of the supported formats.
    #[error("Unsupported file format '{extension}' for {path} (expected txt, csv, json, yaml or yml)")]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
        /// Extension found, empty if none.
        extension: String,
    },

    /// The content did not parse or had the wrong shape.
    #[error("Invalid term list in {path}: {reason}")]
    InvalidFormat {
        /// Offending file.
        path: PathBuf,
        /// Parser message or shape problem.
        reason: String,
    },

    /// The file could not be read.
    #[error("Error loading terms from {path}: {source}")]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
