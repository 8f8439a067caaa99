//! Penalty regimes supported by the engine
//!
//! The regime set is closed: adding a regime means adding a variant here plus
//! the matching rows in the reference data files, never a new trait impl.

use super::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Company code used by the finance ledger for late-filing penalties
pub const LATE_FILING_COMPANY_CODE: &str = "LP";

/// Company code shared by the sanctions regimes
pub const SANCTIONS_COMPANY_CODE: &str = "C1";

/// Penalty regime
///
/// Each regime owns a descriptor, an allow-list section and a set of
/// penalty-bearing subtypes in the reference data. The serialized form is the
/// identifier used as key in those files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    /// Late filing of company accounts
    LateFiling,

    /// Companies sanctions (e.g. failure to file a confirmation statement)
    Sanctions,

    /// Sanctions raised against overseas entities
    SanctionsRoe,
}

impl Regime {
    /// All regimes, in declaration order
    pub const ALL: [Regime; 3] = [Regime::LateFiling, Regime::Sanctions, Regime::SanctionsRoe];

    /// Stable identifier, matching the keys used in the reference data files
    pub fn id(self) -> &'static str {
        match self {
            Regime::LateFiling => "LATE_FILING",
            Regime::Sanctions => "SANCTIONS",
            Regime::SanctionsRoe => "SANCTIONS_ROE",
        }
    }

    /// Prefix carried by the transaction references the ledger issues for this regime
    pub fn reference_prefix(self) -> char {
        match self {
            Regime::LateFiling => 'A',
            Regime::Sanctions => 'P',
            Regime::SanctionsRoe => 'U',
        }
    }

    /// Infer the regime from a ledger transaction reference
    ///
    /// Returns `None` for empty references or unknown prefixes.
    pub fn from_transaction_reference(reference: &str) -> Option<Regime> {
        let prefix = reference.trim().chars().next()?.to_ascii_uppercase();
        Regime::ALL
            .into_iter()
            .find(|regime| regime.reference_prefix() == prefix)
    }

    /// Regime bound to a ledger company code
    ///
    /// `C1` is shared by both sanctions regimes, so it resolves to
    /// [`Regime::Sanctions`]. Callers that need to tell the two apart must
    /// look at the transaction reference instead.
    pub fn for_company_code(company_code: &str) -> Option<Regime> {
        match company_code.trim() {
            LATE_FILING_COMPANY_CODE => Some(Regime::LateFiling),
            SANCTIONS_COMPANY_CODE => Some(Regime::Sanctions),
            _ => None,
        }
    }

    pub fn is_late_filing(self) -> bool {
        matches!(self, Regime::LateFiling)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Regime {
    type Err = EngineError;

    /// Accepts the identifier in any case, with `-` or `_` separators
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Regime::ALL
            .into_iter()
            .find(|regime| regime.id() == normalized)
            .ok_or_else(|| EngineError::unknown_regime(value))
    }
}
