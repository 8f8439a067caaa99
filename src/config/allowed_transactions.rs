//! Allow-list of (transaction type, subtype) pairs per regime
//!
//! Ledger lines whose pair is absent, or present but marked `false`, are
//! intentionally unsupported legacy codes and are dropped before
//! classification.

use crate::types::Regime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type SubtypeFlags = BTreeMap<String, bool>;

/// Allowed pairs for a single regime: transaction type -> subtype -> allowed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedTransactions {
    types: BTreeMap<String, SubtypeFlags>,
}

impl AllowedTransactions {
    /// Build a section from `(type, subtype)` pairs, all marked allowed
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut types: BTreeMap<String, SubtypeFlags> = BTreeMap::new();
        for (transaction_type, subtype) in pairs {
            types
                .entry(transaction_type.to_string())
                .or_default()
                .insert(subtype.to_string(), true);
        }
        Self { types }
    }

    /// Whether the pair is present and marked allowed
    ///
    /// Codes are compared after trimming, since ledger code fields may be padded.
    pub fn is_allowed(&self, transaction_type: &str, transaction_subtype: &str) -> bool {
        self.types
            .get(transaction_type.trim())
            .and_then(|subtypes| subtypes.get(transaction_subtype.trim()))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Allow-list for every configured regime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedTransactionRegistry {
    #[serde(rename = "allowed_transactions", default)]
    regimes: BTreeMap<Regime, AllowedTransactions>,
}

impl AllowedTransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the section for a regime
    pub fn with_regime(mut self, regime: Regime, allowed: AllowedTransactions) -> Self {
        self.regimes.insert(regime, allowed);
        self
    }

    /// Section for a regime, `None` when the regime has no entry set at all
    pub fn for_regime(&self, regime: Regime) -> Option<&AllowedTransactions> {
        self.regimes.get(&regime)
    }
}
