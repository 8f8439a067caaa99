//! Eligibility filter
//!
//! Drops ledger lines whose (transaction type, subtype) pair is not allowed for
//! the active regime. Dropping is silent: such lines are legacy codes the
//! online service deliberately does not handle.

use crate::config::AllowedTransactions;
use crate::types::LedgerLine;

/// Lines of the snapshot allowed for the regime, in their original order
pub fn filter_eligible<'a>(
    lines: &'a [LedgerLine],
    allowed: &AllowedTransactions,
) -> Vec<&'a LedgerLine> {
    lines
        .iter()
        .filter(|line| allowed.is_allowed(&line.transaction_type, &line.transaction_subtype))
        .collect()
}
