//! Batch outcome and the estimating gate shared by both trackers.

use awareness_core::{CostConfirmation, OrderedMap, QuotaPolicy};
use awareness_fetch::SearchError;
use tracing::info;

use crate::error::TermProcessingError;

/// Result of a batch that passed the cost confirmation.
///
/// A batch stopped by the hard cap or a ledger failure still carries the
/// reports gathered before the stop, with the cause in `interrupted`.
#[derive(Debug)]
pub struct BatchOutcome<R> {
    /// Per-term results in term order.
    pub results: OrderedMap<R>,
    /// Terms that were skipped, in term order.
    pub failures: Vec<TermProcessingError>,
    /// Fatal error that ended the batch early.
    pub interrupted: Option<SearchError>,
}

impl<R> BatchOutcome<R> {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self {
            results: OrderedMap::new(),
            failures: Vec::new(),
            interrupted: None,
        }
    }

    /// Returns true if every term was processed and none was skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.interrupted.is_none()
    }

    /// Returns true if a fatal error ended the batch early.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.is_some()
    }

    /// Returns the skipped terms.
    pub fn failed_terms(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.term.as_str())
    }
}

impl<R> Default for BatchOutcome<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Asks for confirmation when `total_queries` may leave the free tier.
///
/// Returns false if the caller declined.
pub(crate) fn approve_cost(
    quota: &QuotaPolicy,
    used: u64,
    total_queries: u64,
    confirm: &mut dyn CostConfirmation,
) -> bool {
    let estimate = quota.estimate(total_queries, used);
    if !estimate.requires_confirmation() {
        return true;
    }

    info!(
        total_queries = estimate.total_queries,
        remaining_free = estimate.remaining_free,
        paid_queries = estimate.paid_queries,
        estimated_cost_usd = estimate.estimated_cost_usd,
        "Batch may exceed the free quota"
    );

    let approved = confirm.confirm(&estimate);
    if !approved {
        info!("Batch cancelled at cost confirmation");
    }
    approved
}

#[cfg(test)]
mod tests {
    use super::*;
    use awareness_core::CostEstimate;

    #[test]
    fn test_within_free_quota_skips_prompt() {
        let mut asked = false;
        let mut confirm = |_: &CostEstimate| {
            asked = true;
            false
        };
        assert!(approve_cost(&QuotaPolicy::default(), 50, 50, &mut confirm));
        assert!(!asked);
    }

    #[test]
    fn test_beyond_free_quota_asks() {
        let mut seen = None;
        let mut confirm = |estimate: &CostEstimate| {
            seen = Some(*estimate);
            false
        };
        assert!(!approve_cost(&QuotaPolicy::default(), 90, 30, &mut confirm));

        let estimate = seen.unwrap();
        assert_eq!(estimate.remaining_free, 10);
        assert_eq!(estimate.paid_queries, 20);
        assert!((estimate.estimated_cost_usd - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_outcome_failed_terms() {
        let mut outcome: BatchOutcome<u64> = BatchOutcome::new();
        assert!(outcome.is_complete());
        outcome.failures.push(TermProcessingError {
            term: "bad".to_string(),
            source: SearchError::InvalidResponse("x".into()),
        });
        assert_eq!(outcome.failed_terms().collect::<Vec<_>>(), vec!["bad"]);
        assert!(!outcome.is_complete());
        assert!(!outcome.is_interrupted());
    }

    #[test]
    fn test_interrupted_outcome_is_incomplete() {
        let mut outcome: BatchOutcome<u64> = BatchOutcome::new();
        outcome.results.insert("done", 1);
        outcome.interrupted = Some(SearchError::QuotaExceeded { used: 5, cap: 5 });

        assert!(outcome.is_interrupted());
        assert!(!outcome.is_complete());
        assert_eq!(outcome.failed_terms().count(), 0);
        assert_eq!(outcome.results.len(), 1);
    }
}
