//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `ledger`: raw ledger lines and account snapshots (input)
//! - `regime`: the closed set of penalty regimes
//! - `transaction_list`: normalized transaction lists (output)
//! - `error`: Error types for the engine

pub mod error;
pub mod ledger;
pub mod regime;
pub mod transaction_list;

pub use error::{EngineError, TokenError};
pub use ledger::{CustomerAccountSnapshot, LedgerLine, INVOICE_TRANSACTION_TYPE};
pub use regime::{Regime, LATE_FILING_COMPANY_CODE, SANCTIONS_COMPANY_CODE};
pub use transaction_list::{
    ChargeCategory, CustomerTransactionList, PayableStatus, TransactionList, TransactionListItem,
};
