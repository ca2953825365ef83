//! Trait definitions for Awareness.

use crate::models::CostEstimate;

/// Decides whether a batch that may leave the free tier should proceed.
///
/// The CLI implements this with an interactive prompt; tests and
/// unattended runs use closures or [`AutoApprove`].
pub trait CostConfirmation {
    /// Returns true to proceed with the batch.
    fn confirm(&mut self, estimate: &CostEstimate) -> bool;
}

impl<F> CostConfirmation for F
where
    F: FnMut(&CostEstimate) -> bool,
{
    fn confirm(&mut self, estimate: &CostEstimate) -> bool {
        self(estimate)
    }
}

/// Approves every batch without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl CostConfirmation for AutoApprove {
    fn confirm(&mut self, _estimate: &CostEstimate) -> bool {
        true
    }
}
