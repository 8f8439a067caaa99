//! Reason resolution
//!
//! Late-filing charges always carry the same reason. Charges for the other
//! regimes look their subtype up in the reason table and fall back to a
//! generic reason. Lines that are not charges carry no reason at all.

use super::traits::ReasonProvider;
use crate::config::PenaltyReasonTable;
use crate::types::{LedgerLine, Regime};

/// Reason stamped on every late-filing charge
pub const LATE_FILING_REASON: &str = "Late filing of accounts";

/// Reason used when the subtype has no entry in the reason table
pub const FALLBACK_REASON: &str = "Penalty";

/// Company-code driven reason policy
///
/// The owning company code, not the requested regime, decides whether the
/// fixed late-filing reason applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReasonProvider;

impl ReasonProvider for DefaultReasonProvider {
    fn reason(&self, line: &LedgerLine, _regime: Regime, reasons: &PenaltyReasonTable) -> String {
        if !line.is_invoice() {
            return String::new();
        }

        match Regime::for_company_code(&line.company_code) {
            Some(Regime::LateFiling) => LATE_FILING_REASON.to_string(),
            _ => reasons
                .reason_for(&line.transaction_subtype)
                .unwrap_or(FALLBACK_REASON)
                .to_string(),
        }
    }
}
