//! Output types produced by the engine
//!
//! A [`TransactionList`] is built fresh on every invocation and carries no
//! identity beyond the call that produced it. Field names follow the JSON
//! shape callers serialize into response bodies.

use super::regime::Regime;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of charge a ledger line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeCategory {
    /// Subtype is a recognized penalty-bearing code for the active regime
    Penalty,

    /// Incidental costs, fees and anything unrecognized
    Other,
}

impl ChargeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargeCategory::Penalty => "penalty",
            ChargeCategory::Other => "other",
        }
    }
}

impl fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a line can be paid online on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayableStatus {
    Open,
    Closed,
}

impl PayableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayableStatus::Open => "open",
            PayableStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized view of one surviving ledger line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListItem {
    /// Copied from the ledger transaction reference
    pub id: String,

    /// Integrity token stamped on this item
    pub etag: String,

    /// Display kind taken from the regime descriptor
    pub kind: String,

    pub is_paid: bool,
    pub is_dca: bool,
    pub due_date: NaiveDate,
    pub made_up_date: NaiveDate,
    pub transaction_date: NaiveDate,

    #[serde(with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding: Decimal,

    #[serde(rename = "type")]
    pub category: ChargeCategory,

    pub reason: String,
    pub payable_status: PayableStatus,
}

/// Ordered list of items, index-aligned with the surviving ledger lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    /// Integrity token for the list as a whole
    pub etag: String,
    pub items_per_page: usize,
    pub start_index: usize,
    pub total_results: usize,
    pub items: Vec<TransactionListItem>,
}

impl TransactionList {
    /// Wrap items into a single, unpaged list
    pub fn new(etag: String, items: Vec<TransactionListItem>) -> Self {
        Self {
            etag,
            items_per_page: items.len(),
            start_index: 0,
            total_results: items.len(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A generated list together with the account it was generated for
///
/// This is the unit the processing strategies hand to the output writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTransactionList {
    pub customer_code: String,
    pub company_code: String,
    pub regime: Regime,
    #[serde(flatten)]
    pub list: TransactionList,
}
