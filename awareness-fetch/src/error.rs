//! Search error types.

use awareness_store::StoreError;
use thiserror::Error;

/// Error type for search API operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Issuing the call would pass the hard daily cap.
    #[error("Daily query cap reached: {used} of {cap} queries already used today")]
    QuotaExceeded {
        /// Queries used today.
        used: u64,
        /// Hard daily cap.
        cap: u64,
    },

    /// The API answered with a non-success HTTP status.
    #[error("Search API returned HTTP {status}: {message}")]
    TransientStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response body.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid API endpoint.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The usage ledger could not be persisted.
    #[error("Usage ledger error: {0}")]
    Ledger(#[from] StoreError),
}

impl SearchError {
    /// Returns true if the error must stop the whole batch.
    ///
    /// The hard cap and ledger persistence are batch-wide; everything
    /// else only affects the term being processed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SearchError::QuotaExceeded { .. } | SearchError::Ledger(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(SearchError::QuotaExceeded { used: 10_000, cap: 10_000 }.is_fatal());
        assert!(SearchError::Ledger(StoreError::Config("x".into())).is_fatal());
        assert!(
            !SearchError::TransientStatus {
                status: 403,
                message: "forbidden".into()
            }
            .is_fatal()
        );
        assert!(!SearchError::InvalidResponse("bad".into()).is_fatal());
    }
}
