//! Tracker error types.

use awareness_core::CoreError;
use awareness_fetch::SearchError;
use thiserror::Error;

/// Error that ends a whole batch.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Invalid tracker configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A batch-wide search failure (hard cap, ledger persistence).
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Core model error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl TrackerError {
    /// Returns true if the batch stopped at the hard daily cap.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Search(SearchError::QuotaExceeded { .. }))
    }
}

/// A single term that could not be processed.
///
/// Collected in the batch outcome; the batch carries on with the next term.
#[derive(Debug, Error)]
#[error("Error processing '{term}': {source}")]
pub struct TermProcessingError {
    /// The failing term.
    pub term: String,
    /// What went wrong.
    #[source]
    pub source: SearchError,
}
