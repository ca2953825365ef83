// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Awareness Tracker
//!
//! Batch orchestration for the Awareness toolkit.
//!
//! Two independent trackers share the quota-aware
//! [`SearchClient`](awareness_fetch::SearchClient):
//!
//! - [`CountTracker`] - One total-results query per term
//! - [`RankTracker`] - Paginated search, first-occurrence rank per project
//!
//! Both run terms strictly in order with a minimum delay between calls
//! ([`RequestPacer`]) and ask a [`CostConfirmation`](awareness_core::CostConfirmation)
//! before a batch that may leave the free tier.
//!
//! ## Example
//!
//! ```ignore
//! use awareness_core::AutoApprove;
//! use awareness_tracker::{RankTracker, TrackerConfig};
//!
//! let config = TrackerConfig::builder(api_key, engine_id)
//!     .projects(["tokio", "axum"])
//!     .max_results_per_term(50)
//!     .build()?;
//!
//! let mut tracker = RankTracker::connect(&config).await?;
//! if let Some(outcome) = tracker.run(&terms, &mut AutoApprove).await? {
//!     for failure in &outcome.failures {
//!         eprintln!("{failure}");
//!     }
//! }
//! ```

pub mod batch;
pub mod config;
pub mod count;
pub mod error;
pub mod pacer;
pub mod rank;

pub use batch::BatchOutcome;
pub use config::{MAX_PAGES, MAX_RESULTS_PER_TERM, PAGE_SIZE, TrackerConfig, TrackerConfigBuilder};
pub use count::CountTracker;
pub use error::{TermProcessingError, TrackerError};
pub use pacer::{DEFAULT_REQUEST_DELAY, RequestPacer};
pub use rank::RankTracker;

#[cfg(test)]
mod test_support;
