//! Capability traits injected into the transaction list generator
//!
//! Each trait is a single-method policy so an alternate implementation can be
//! swapped in for a new regime or for testing without touching the assembler.
//! All of them are `Send + Sync`: one generator is shared across concurrent
//! invocations.

use crate::config::PenaltyReasonTable;
use crate::types::{ChargeCategory, LedgerLine, PayableStatus, Regime, TokenError};

/// Derives the human-readable reason for a ledger line
pub trait ReasonProvider: Send + Sync {
    /// Resolve the reason for one surviving line
    ///
    /// # Arguments
    ///
    /// * `line` - The ledger line being assembled
    /// * `regime` - The regime the list is generated for
    /// * `reasons` - Subtype -> reason table for the non-late-filing regimes
    ///
    /// # Returns
    ///
    /// The reason text; empty for lines that are not genuine charges
    fn reason(&self, line: &LedgerLine, regime: Regime, reasons: &PenaltyReasonTable) -> String;
}

/// The per-line facts the payable status is decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub is_paid: bool,
    pub is_dca: bool,
    pub category: ChargeCategory,
}

/// Decides whether a line can be paid online on its own
pub trait PayableStatusProvider: Send + Sync {
    /// # Arguments
    ///
    /// * `line` - Classification of the line
    /// * `surviving_lines` - Number of lines left in the snapshot after filtering
    fn payable_status(&self, line: &ClassifiedLine, surviving_lines: usize) -> PayableStatus;
}

/// Source of opaque integrity tokens
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh token, or fail
    fn generate(&self) -> Result<String, TokenError>;
}
