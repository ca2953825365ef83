//! JSON output formatting.

use anyhow::Result;
use awareness_core::{QuotaPolicy, UsageLedger};
use chrono::NaiveDate;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for `awareness usage`.
#[derive(Debug, Serialize)]
pub struct UsageOutput {
    pub date: NaiveDate,
    pub used: u64,
    pub remaining_free: u64,
    pub daily_free_quota: u64,
    pub hard_daily_cap: u64,
    pub paid_tier: bool,
    pub cost_per_paid_query: f64,
}

impl UsageOutput {
    fn new(ledger: &UsageLedger, quota: &QuotaPolicy) -> Self {
        Self {
            date: ledger.date,
            used: ledger.count,
            remaining_free: quota.remaining_free(ledger.count),
            daily_free_quota: quota.daily_free_quota,
            hard_daily_cap: quota.hard_daily_cap,
            paid_tier: quota.in_paid_tier(ledger.count),
            cost_per_paid_query: quota.cost_per_paid_query,
        }
    }
}

/// A skipped term.
#[derive(Debug, Serialize)]
pub struct FailureOutput<'a> {
    pub term: &'a str,
    pub error: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(data)?)
        } else {
            Ok(serde_json::to_string(data)?)
        }
    }

    /// Formats today's usage.
    pub fn format_usage(&self, ledger: &UsageLedger, quota: &QuotaPolicy) -> Result<String> {
        self.format(&UsageOutput::new(ledger, quota))
    }

    /// Formats the terms a batch skipped.
    pub fn format_failures(
        &self,
        failures: &[awareness_tracker::TermProcessingError],
    ) -> Result<String> {
        let items: Vec<FailureOutput<'_>> = failures
            .iter()
            .map(|f| FailureOutput {
                term: &f.term,
                error: f.source.to_string(),
            })
            .collect();
        self.format(&items)
    }
}

// ============================================================================
// Tests
// ============================================================================
