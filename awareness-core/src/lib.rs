// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Awareness Core
//!
//! Core types, models, and the rank finder for the Awareness toolkit.
//!
//! This crate provides the foundational abstractions used across all other
//! Awareness crates:
//!
//! - Domain models (search results, reports, usage ledger, quota policy)
//! - The rank finder ([`find_ranks`])
//! - The cost confirmation capability ([`CostConfirmation`])
//! - Error types
//!
//! ## Key Types
//!
//! ### Search Types
//! - [`SearchResultItem`] - One organic search result
//! - [`SearchPage`] - One page of up to ten results
//! - [`CountResult`] - A total-results estimate
//!
//! ### Reports
//! - [`RankReport`] - Per-term project rankings
//! - [`CountReport`] - Per-term result count
//! - [`OrderedMap`] - Insertion-ordered mapping used for term and project order
//!
//! ### Quota
//! - [`UsageLedger`] - Billable pages used today
//! - [`QuotaPolicy`] - Free quota, hard cap, and pricing
//! - [`CostEstimate`] - Projected cost shown before paid queries

pub mod error;
pub mod models;
pub mod ranking;
pub mod traits;

pub use error::CoreError;

pub use models::{
    // Search types
    CountResult,
    SearchPage,
    SearchResultItem,
    // Reports
    CountReport,
    OrderedMap,
    ProjectRankings,
    RankReport,
    // Quota
    COST_PER_PAID_QUERY,
    CostEstimate,
    DAILY_FREE_QUOTA,
    HARD_DAILY_CAP,
    QuotaPolicy,
    UsageLedger,
};

pub use ranking::{all_ranked, find_ranks, unranked};
pub use traits::{AutoApprove, CostConfirmation};
