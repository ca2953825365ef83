//! Quota policy and cost estimation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Free queries granted per day.
pub const DAILY_FREE_QUOTA: u64 = 100;

/// Hard ceiling on queries per day.
pub const HARD_DAILY_CAP: u64 = 10_000;

/// Price in USD of each query beyond the free quota.
pub const COST_PER_PAID_QUERY: f64 = 0.005;

/// Daily quota limits and pricing for the search API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    /// Free queries per day.
    pub daily_free_quota: u64,
    /// Queries per day that must never be exceeded.
    pub hard_daily_cap: u64,
    /// Price in USD per paid query.
    pub cost_per_paid_query: f64,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            daily_free_quota: DAILY_FREE_QUOTA,
            hard_daily_cap: HARD_DAILY_CAP,
            cost_per_paid_query: COST_PER_PAID_QUERY,
        }
    }
}

impl QuotaPolicy {
    /// Checks that the limits are coherent.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.daily_free_quota > self.hard_daily_cap {
            return Err(CoreError::InvalidConfig(format!(
                "free quota ({}) exceeds hard daily cap ({})",
                self.daily_free_quota, self.hard_daily_cap
            )));
        }
        if !self.cost_per_paid_query.is_finite() || self.cost_per_paid_query < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "invalid cost per paid query: {}",
                self.cost_per_paid_query
            )));
        }
        Ok(())
    }

    /// Free queries left given today's usage.
    pub fn remaining_free(&self, used: u64) -> u64 {
        self.daily_free_quota.saturating_sub(used)
    }

    /// Returns true once today's usage has left the free tier.
    pub fn in_paid_tier(&self, used: u64) -> bool {
        used >= self.daily_free_quota
    }

    /// Returns true if `additional` more queries would pass the hard cap.
    pub fn would_exceed_cap(&self, used: u64, additional: u64) -> bool {
        used.saturating_add(additional) > self.hard_daily_cap
    }

    /// Projects the cost of issuing `total_queries` more queries today.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, total_queries: u64, used: u64) -> CostEstimate {
        let remaining_free = self.remaining_free(used);
        let paid_queries = total_queries.saturating_sub(remaining_free);
        CostEstimate {
            total_queries,
            remaining_free,
            paid_queries,
            estimated_cost_usd: paid_queries as f64 * self.cost_per_paid_query,
        }
    }
}

/// Projected cost of a batch, presented before paid queries are issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Worst-case queries the batch may issue.
    pub total_queries: u64,
    /// Free queries left today.
    pub remaining_free: u64,
    /// Queries that would be billed.
    pub paid_queries: u64,
    /// Projected cost in USD.
    pub estimated_cost_usd: f64,
}

impl CostEstimate {
    /// Returns true if the batch may leave the free tier.
    pub fn requires_confirmation(&self) -> bool {
        self.total_queries > self.remaining_free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_free_saturates() {
        let policy = QuotaPolicy::default();
        assert_eq!(policy.remaining_free(0), 100);
        assert_eq!(policy.remaining_free(60), 40);
        assert_eq!(policy.remaining_free(250), 0);
    }

    #[test]
    fn test_estimate_within_free_tier() {
        let estimate = QuotaPolicy::default().estimate(50, 20);
        assert_eq!(estimate.remaining_free, 80);
        assert_eq!(estimate.paid_queries, 0);
        assert!(!estimate.requires_confirmation());
    }

    #[test]
    fn test_estimate_paid_queries() {
        let estimate = QuotaPolicy::default().estimate(30, 90);
        assert_eq!(estimate.remaining_free, 10);
        assert_eq!(estimate.paid_queries, 20);
        assert!((estimate.estimated_cost_usd - 0.10).abs() < 1e-9);
        assert!(estimate.requires_confirmation());
    }

    #[test]
    fn test_estimate_exactly_remaining_needs_no_confirmation() {
        let estimate = QuotaPolicy::default().estimate(10, 90);
        assert!(!estimate.requires_confirmation());
    }

    #[test]
    fn test_would_exceed_cap() {
        let policy = QuotaPolicy::default();
        assert!(!policy.would_exceed_cap(9_999, 1));
        assert!(policy.would_exceed_cap(10_000, 1));
        assert!(policy.would_exceed_cap(9_990, 11));
    }

    #[test]
    fn test_validate_rejects_free_above_cap() {
        let policy = QuotaPolicy {
            daily_free_quota: 200,
            hard_daily_cap: 100,
            ..QuotaPolicy::default()
        };
        assert!(policy.validate().is_err());
        assert!(QuotaPolicy::default().validate().is_ok());
    }
}
