//! Domain models for Awareness.
//!
//! ## Submodules
//!
//! - `search` - Search results as returned by the API (items, pages, counts)
//! - `report` - Per-term reports written to batch output
//! - `ledger` - Daily usage ledger
//! - `quota` - Quota policy and cost estimates
//! - `ordered` - Insertion-ordered map used by reports
//! - [`timestamp`] - Report timestamp format

mod ledger;
mod ordered;
mod quota;
mod report;
mod search;
pub mod timestamp;

pub use ledger::{UsageLedger, today};
pub use ordered::OrderedMap;
pub use quota::{
    COST_PER_PAID_QUERY, CostEstimate, DAILY_FREE_QUOTA, HARD_DAILY_CAP, QuotaPolicy,
};
pub use report::{CountReport, ProjectRankings, RankReport};
pub use search::{CountResult, SearchPage, SearchResultItem};
