//! Text output formatting with colors.

use awareness_core::{CountReport, QuotaPolicy, RankReport, UsageLedger};
use awareness_tracker::TermProcessingError;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the ranks found for one term.
    pub fn format_rank(&self, term: &str, report: &RankReport, max_results: u32) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold(term),
            self.dim(&format!("(about {} results)", format_number(report.total_results)))
        )];

        let width = report
            .project_rankings
            .keys()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);

        for (project, rank) in report.project_rankings.iter() {
            let status = match rank {
                Some(rank) => self.green(&format!("#{rank}")),
                None => self.yellow(&format!("Not found in first {max_results} results")),
            };
            lines.push(format!("  {project:<width$}  {status}"));
        }

        lines.join("\n")
    }

    /// Formats the result count of one term.
    pub fn format_count(&self, term: &str, report: &CountReport) -> String {
        format!("{}: {} results", self.bold(term), format_number(report.count))
    }

    /// Formats today's usage.
    pub fn format_usage(&self, ledger: &UsageLedger, quota: &QuotaPolicy) -> String {
        let remaining = quota.remaining_free(ledger.count);
        let mut lines = vec![
            self.bold("API Usage"),
            "─".repeat(40),
            format!("Date:         {}", ledger.date.format("%Y-%m-%d")),
            format!(
                "Used today:   {} / {} free",
                format_number(ledger.count),
                format_number(quota.daily_free_quota)
            ),
            format!("Free left:    {}", self.color_for_remaining(remaining, quota)),
            format!("Hard cap:     {}", format_number(quota.hard_daily_cap)),
        ];

        if quota.in_paid_tier(ledger.count) {
            lines.push(String::new());
            lines.push(self.yellow(&format!(
                "Free quota used up: further queries cost ${} each",
                quota.cost_per_paid_query
            )));
        }

        lines.join("\n")
    }

    /// Formats the terms a batch skipped.
    pub fn format_failures(&self, failures: &[TermProcessingError]) -> String {
        let mut lines = vec![self.red(&format!("Skipped {} term(s):", failures.len()))];
        lines.extend(failures.iter().map(|f| format!("  {f}")));
        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_remaining(&self, remaining: u64, quota: &QuotaPolicy) -> String {
        let text = format_number(remaining);
        if remaining == 0 {
            self.red(&text)
        } else if remaining * 5 < quota.daily_free_quota {
            self.yellow(&text)
        } else {
            self.green(&text)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

/// Formats an integer with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
