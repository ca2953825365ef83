//! Usage ledger persistence.
//!
//! The ledger is a single JSON file, `{"date": "YYYY-MM-DD", "count": N}`,
//! loaded once when a client is built and rewritten after every billable
//! call.

use awareness_core::{UsageLedger, models::today};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// File-backed usage ledger.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: UsageLedger,
}

impl LedgerStore {
    /// Loads the ledger for the current local day.
    ///
    /// Never fails: a missing, unreadable, or stale file yields a zeroed
    /// ledger for today.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_for_date(path, today()).await
    }

    /// Loads the ledger as of `today`.
    pub async fn load_for_date(path: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let path = path.into();

        let ledger = match load_json::<UsageLedger>(&path).await {
            Ok(stored) if stored.date == today => {
                debug!(path = %path.display(), count = stored.count, "Loaded usage ledger");
                stored
            }
            Ok(stored) => {
                info!(
                    path = %path.display(),
                    stored_date = %stored.date,
                    stored_count = stored.count,
                    "Usage ledger is from a previous day, starting fresh"
                );
                UsageLedger::fresh(today)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "No usage ledger yet, starting fresh");
                UsageLedger::fresh(today)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable usage ledger, starting fresh");
                UsageLedger::fresh(today)
            }
        };

        Self { path, ledger }
    }

    /// Returns the current ledger value.
    pub fn ledger(&self) -> UsageLedger {
        self.ledger
    }

    /// Returns the billable pages used today.
    ///
    /// A ledger left over from a previous day reads as zero.
    pub fn used_today(&self) -> u64 {
        self.used_on(today())
    }

    /// Returns the billable pages used as of `today`.
    pub fn used_on(&self, today: NaiveDate) -> u64 {
        self.ledger.current_for(today).count
    }

    /// Returns the ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the ledger file with the current value.
    pub async fn save(&self) -> Result<(), StoreError> {
        save_json(&self.path, &self.ledger).await
    }

    /// Adds billable pages and persists immediately.
    pub async fn record(&mut self, pages: u64) -> Result<(), StoreError> {
        self.record_on(pages, today()).await
    }

    /// Adds billable pages as of `today` and persists immediately.
    pub async fn record_on(&mut self, pages: u64, today: NaiveDate) -> Result<(), StoreError> {
        if self.ledger.record(pages, today) {
            info!(date = %today, "Day changed, usage ledger reset");
        }
        debug!(count = self.ledger.count, added = pages, "Recording API usage");
        self.save().await
    }
}
