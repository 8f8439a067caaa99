//! Ledger input types
//!
//! This module defines the raw charge lines supplied by the finance ledger and
//! the per-customer snapshot the engine operates on. Both are constructed by the
//! ledger source adapter and never mutated by the engine.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type the ledger uses for a genuine charge (an invoice)
///
/// Any other transaction type is an administrative entry or an incidental
/// cost line and never carries a reason.
pub const INVOICE_TRANSACTION_TYPE: &str = "1";

/// One raw charge or penalty record from the finance ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    pub company_code: String,
    pub ledger_code: String,
    pub customer_code: String,

    /// Unique within an account snapshot; becomes the output item identifier
    pub transaction_reference: String,

    pub transaction_date: NaiveDate,
    pub made_up_date: NaiveDate,
    pub due_date: NaiveDate,

    /// Original amount of the charge
    pub amount: Decimal,

    /// Amount still owed
    pub outstanding_amount: Decimal,

    pub is_paid: bool,
    pub transaction_type: String,
    pub transaction_subtype: String,

    /// Free-text description, fixed width in the source system
    pub type_description: String,

    pub account_status: String,

    /// Raw dunning status as delivered by the ledger
    ///
    /// The ledger pads this field with trailing spaces; it is interpreted by
    /// [`crate::core::dunning`] and must not be trimmed before that.
    pub dunning_status: String,
}

impl LedgerLine {
    /// Whether the transaction type marks this line as an actual charge
    pub fn is_invoice(&self) -> bool {
        self.transaction_type.trim() == INVOICE_TRANSACTION_TYPE
    }
}

/// A customer's outstanding ledger lines at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAccountSnapshot {
    pub customer_code: String,
    pub company_code: String,
    pub created_at: DateTime<Utc>,

    /// Ledger lines in the order the ledger reported them
    pub lines: Vec<LedgerLine>,
}

impl CustomerAccountSnapshot {
    pub fn new(
        customer_code: impl Into<String>,
        company_code: impl Into<String>,
        lines: Vec<LedgerLine>,
    ) -> Self {
        Self {
            customer_code: customer_code.into(),
            company_code: company_code.into(),
            created_at: Utc::now(),
            lines,
        }
    }
}
