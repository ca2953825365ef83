//! Daily usage ledger.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Count of billable API pages consumed on a calendar day.
///
/// Serialized as `{"date": "YYYY-MM-DD", "count": <integer>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    /// Day the count applies to.
    pub date: NaiveDate,
    /// Billable pages used on that day.
    pub count: u64,
}

impl UsageLedger {
    /// Creates a zeroed ledger for the given day.
    pub fn fresh(date: NaiveDate) -> Self {
        Self { date, count: 0 }
    }

    /// Creates a zeroed ledger for the current local day.
    pub fn today() -> Self {
        Self::fresh(today())
    }

    /// Returns this ledger if it belongs to `today`, else a zeroed one.
    pub fn current_for(self, today: NaiveDate) -> Self {
        if self.date == today {
            self
        } else {
            Self::fresh(today)
        }
    }

    /// Adds billable pages, resetting first if the day has changed.
    ///
    /// Returns true when a day rollover reset the count.
    pub fn record(&mut self, pages: u64, today: NaiveDate) -> bool {
        let rolled_over = self.date != today;
        if rolled_over {
            *self = Self::fresh(today);
        }
        self.count = self.count.saturating_add(pages);
        rolled_over
    }
}

/// Returns the current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
