//! Penalty type catalogue
//!
//! The catalogue is the single source for two derived views:
//!
//! - the **penalty-bearing set** per regime, used by the line classifier
//! - the **reason table**, used by the reason resolver for every regime other
//!   than late filing
//!
//! Both views are computed when the catalogue is built and rebuilt whenever
//! subtypes are disabled, so lookups during generation are plain reads.

use crate::types::{Regime, INVOICE_TRANSACTION_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One configured penalty type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTypeConfig {
    pub regime: Regime,
    pub transaction_type: String,
    pub transaction_subtype: String,
    #[serde(default)]
    pub description: String,
    pub reason: String,
    #[serde(default)]
    pub disabled: bool,
}

impl PenaltyTypeConfig {
    pub fn new(regime: Regime, transaction_type: &str, transaction_subtype: &str, reason: &str) -> Self {
        Self {
            regime,
            transaction_type: transaction_type.to_string(),
            transaction_subtype: transaction_subtype.to_string(),
            description: String::new(),
            reason: reason.to_string(),
            disabled: false,
        }
    }
}

/// (transaction type, subtype) pairs recognized as penalty-bearing for a regime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenaltySubtypeSet {
    pairs: HashSet<(String, String)>,
}

impl PenaltySubtypeSet {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(t, s)| (t.to_string(), s.to_string()))
                .collect(),
        }
    }

    pub fn contains(&self, transaction_type: &str, transaction_subtype: &str) -> bool {
        self.pairs.contains(&(
            transaction_type.trim().to_string(),
            transaction_subtype.trim().to_string(),
        ))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A single subtype -> reason row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonEntry {
    pub transaction_subtype: String,
    pub reason: String,
}

/// Ordered subtype -> reason lookup for the non-late-filing regimes
///
/// The first matching row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyReasonTable {
    entries: Vec<ReasonEntry>,
}

impl PenaltyReasonTable {
    pub fn new<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: rows
                .into_iter()
                .map(|(subtype, reason)| ReasonEntry {
                    transaction_subtype: subtype.to_string(),
                    reason: reason.to_string(),
                })
                .collect(),
        }
    }

    pub fn reason_for(&self, transaction_subtype: &str) -> Option<&str> {
        let subtype = transaction_subtype.trim();
        self.entries
            .iter()
            .find(|entry| entry.transaction_subtype == subtype)
            .map(|entry| entry.reason.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk shape of the penalty types file
#[derive(Debug, Default, Deserialize)]
pub struct PenaltyTypesFile {
    #[serde(default)]
    pub penalty_types: Vec<PenaltyTypeConfig>,
}

/// Configured penalty types with their derived lookup views
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PenaltyTypesFile")]
pub struct PenaltyTypeCatalogue {
    entries: Vec<PenaltyTypeConfig>,
    penalty_subtypes: BTreeMap<Regime, PenaltySubtypeSet>,
    reasons: PenaltyReasonTable,
}

impl From<PenaltyTypesFile> for PenaltyTypeCatalogue {
    fn from(file: PenaltyTypesFile) -> Self {
        Self::new(file.penalty_types)
    }
}

impl PenaltyTypeCatalogue {
    pub fn new(entries: Vec<PenaltyTypeConfig>) -> Self {
        let mut catalogue = Self {
            entries,
            penalty_subtypes: BTreeMap::new(),
            reasons: PenaltyReasonTable::default(),
        };
        catalogue.rebuild_views();
        catalogue
    }

    fn rebuild_views(&mut self) {
        let mut penalty_subtypes: BTreeMap<Regime, PenaltySubtypeSet> = BTreeMap::new();
        for entry in self.entries.iter().filter(|entry| {
            !entry.disabled && entry.transaction_type.trim() == INVOICE_TRANSACTION_TYPE
        }) {
            penalty_subtypes.entry(entry.regime).or_default().pairs.insert((
                entry.transaction_type.trim().to_string(),
                entry.transaction_subtype.trim().to_string(),
            ));
        }

        let reasons = PenaltyReasonTable::new(
            self.entries
                .iter()
                .filter(|entry| !entry.regime.is_late_filing())
                .map(|entry| (entry.transaction_subtype.trim(), entry.reason.as_str())),
        );

        self.penalty_subtypes = penalty_subtypes;
        self.reasons = reasons;
    }

    /// Mark every entry with one of the given subtypes as disabled
    ///
    /// Disabled subtypes leave the penalty-bearing set but keep their reason.
    pub fn disable_subtypes<S: AsRef<str>>(&mut self, subtypes: &[S]) {
        if subtypes.is_empty() {
            return;
        }
        for entry in &mut self.entries {
            if subtypes
                .iter()
                .any(|subtype| subtype.as_ref().trim() == entry.transaction_subtype.trim())
            {
                entry.disabled = true;
            }
        }
        self.rebuild_views();
    }

    /// Penalty-bearing set for a regime; empty when nothing is configured
    pub fn penalty_subtypes(&self, regime: Regime) -> PenaltySubtypeSet {
        self.penalty_subtypes
            .get(&regime)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reason_table(&self) -> &PenaltyReasonTable {
        &self.reasons
    }

    /// Check every entry has a subtype and a reason
    pub fn validate(&self) -> Result<(), String> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.transaction_subtype.trim().is_empty() {
                return Err(format!("penalty type #{index} has an empty transaction_subtype"));
            }
            if entry.reason.trim().is_empty() {
                return Err(format!(
                    "penalty type #{index} ({}) has an empty reason",
                    entry.transaction_subtype
                ));
            }
        }
        Ok(())
    }
}

/// Split a comma separated subtype list such as `"S1, A2"`
pub fn parse_subtype_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|subtype| !subtype.is_empty())
        .map(str::to_string)
        .collect()
}
