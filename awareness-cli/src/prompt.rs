//! Interactive cost confirmation.

use awareness_core::{CostConfirmation, CostEstimate};
use std::io::{self, BufRead, Write};
use tracing::warn;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Asks on a terminal before a batch that may incur charges.
pub struct PromptConfirmation<R, W> {
    input: R,
    output: W,
    use_colors: bool,
}

impl PromptConfirmation<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr and reads the answer from stdin.
    pub fn stdin(use_colors: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), use_colors)
    }
}

impl<R: BufRead, W: Write> PromptConfirmation<R, W> {
    /// Creates a prompt over arbitrary streams.
    pub fn new(input: R, output: W, use_colors: bool) -> Self {
        Self {
            input,
            output,
            use_colors,
        }
    }

    fn ask(&mut self, estimate: &CostEstimate) -> io::Result<bool> {
        let (on, off) = if self.use_colors { (YELLOW, RESET) } else { ("", "") };

        writeln!(self.output, "{on}Warning: this batch may exceed the free daily quota.{off}")?;
        writeln!(self.output, "  Queries (worst case): {}", estimate.total_queries)?;
        writeln!(self.output, "  Free queries left:    {}", estimate.remaining_free)?;
        writeln!(self.output, "  Paid queries:         {}", estimate.paid_queries)?;
        writeln!(self.output, "  Estimated cost:       ${:.2}", estimate.estimated_cost_usd)?;
        write!(self.output, "Continue? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

impl<R: BufRead, W: Write> CostConfirmation for PromptConfirmation<R, W> {
    fn confirm(&mut self, estimate: &CostEstimate) -> bool {
        self.ask(estimate).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read confirmation, treating as no");
            false
        })
    }
}

/// Accepts `y` or `yes` in any case.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use awareness_core::QuotaPolicy;

    fn estimate() -> CostEstimate {
        QuotaPolicy::default().estimate(300, 40)
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES \r\n"));
        assert!(!is_yes("n\n"));
        assert!(!is_yes("yep"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_prompt_shows_cost_and_accepts_yes() {
        let mut output = Vec::new();
        let mut prompt = PromptConfirmation::new("Yes\n".as_bytes(), &mut output, false);

        assert!(prompt.confirm(&estimate()));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Queries (worst case): 300"));
        assert!(shown.contains("Free queries left:    60"));
        assert!(shown.contains("Paid queries:         240"));
        assert!(shown.contains("Estimated cost:       $1.20"));
        assert!(!shown.contains(YELLOW));
    }

    #[test]
    fn test_prompt_declines_on_anything_else() {
        let mut prompt = PromptConfirmation::new("no\n".as_bytes(), Vec::new(), true);
        assert!(!prompt.confirm(&estimate()));

        let mut closed = PromptConfirmation::new("".as_bytes(), Vec::new(), true);
        assert!(!closed.confirm(&estimate()));
    }
}
