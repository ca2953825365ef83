//! Per-term report types written to batch output files.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

/// Mapping from project name to its 1-based rank, `None` when not found.
pub type ProjectRankings = OrderedMap<Option<u32>>;

/// Rank report for a single search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankReport {
    /// Total result estimate taken from the first page.
    pub total_results: u64,
    /// Rank per tracked project, in configured project order.
    pub project_rankings: ProjectRankings,
    /// Batch timestamp shared by every term of one invocation.
    #[serde(with = "super::timestamp")]
    pub timestamp: NaiveDateTime,
}

impl RankReport {
    /// Returns the number of projects that received a rank.
    pub fn ranked_count(&self) -> usize {
        self.project_rankings.values().filter(|r| r.is_some()).count()
    }
}

/// Count report for a single search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountReport {
    /// Total result estimate.
    pub count: u64,
    /// Batch timestamp shared by every term of one invocation.
    #[serde(with = "super::timestamp")]
    pub timestamp: NaiveDateTime,
}
