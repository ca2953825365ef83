// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Awareness Store
//!
//! Flat-file persistence for the Awareness toolkit.
//!
//! This crate provides:
//!
//! - **LedgerStore**: The daily usage ledger, persisted after every mutation
//! - **Term loaders**: Search-term lists from txt, csv, json, and yaml files
//! - **Settings**: Optional user defaults (credentials, projects, paths)
//! - **Persistence**: Atomic JSON file helpers and default paths
//!
//! ## Usage
//!
//! ```ignore
//! use awareness_store::{LedgerStore, default_ledger_path, load_terms};
//!
//! let mut ledger = LedgerStore::load(default_ledger_path()).await;
//! ledger.record(1).await?;
//!
//! let terms = load_terms(Path::new("terms.yaml")).await?;
//! ```

pub mod error;
pub mod ledger;
pub mod persistence;
pub mod settings;
pub mod terms;

pub use error::{StoreError, TermsError};
pub use ledger::LedgerStore;
pub use persistence::{
    default_config_dir, default_ledger_path, default_settings_path, load_json, save_json,
    save_json_private,
};
pub use settings::{Settings, mask_secret};
pub use terms::{TermsFormat, load_terms, parse_terms};
