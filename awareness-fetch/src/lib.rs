// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Awareness Fetch
//!
//! Search API access for the Awareness toolkit.
//!
//! This crate owns everything between a tracker and the network:
//!
//! - [`SearchApi`] - One HTTP GET per call, raw status and body back
//! - [`GoogleSearchApi`] - Google Custom Search JSON API implementation
//! - [`SearchClient`] - Quota gate and usage ledger around a [`SearchApi`]
//! - [`parser`] - Response body parsing
//! - [`RetryPolicy`] - Backoff for requests that never got an answer
//!
//! ## Example
//!
//! ```ignore
//! use awareness_core::QuotaPolicy;
//! use awareness_fetch::{GoogleSearchApi, SearchClient};
//! use awareness_store::{LedgerStore, default_ledger_path};
//!
//! let api = GoogleSearchApi::new(api_key, engine_id)?;
//! let ledger = LedgerStore::load(default_ledger_path()).await;
//! let mut client = SearchClient::new(api, ledger, QuotaPolicy::default());
//!
//! let count = client.fetch_count("rust web framework").await?;
//! let page = client.fetch_page("rust web framework", 1, 10).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod parser;
pub mod retry;

pub use api::{
    ApiResponse, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, GoogleSearchApi, MAX_PAGE_SIZE, SearchApi,
    SearchQuery,
};
pub use client::SearchClient;
pub use error::SearchError;
pub use retry::RetryPolicy;
