//! Penalty Ledger Engine Library
//! # Overview
//!
//! This library turns raw finance-ledger lines into normalized penalty
//! transaction lists: which lines are penalties, whether each can be paid
//! online, why it was raised, and an integrity token per record. A streaming
//! CSV front end with a sync and an async strategy drives it in batch.
//!
//! # Architecture
//!
//! - [`types`] - Ledger input, transaction list output, regimes and errors
//! - [`config`] - Reference data: allow-list, regime descriptors, penalty types
//! - [`core`] - Generation components:
//!   - [`core::engine`] - Transaction list assembly
//!   - [`core::eligibility`] - Allow-list filtering
//!   - [`core::classifier`] - Penalty / other classification
//!   - [`core::reason`] - Reason resolution
//!   - [`core::dunning`] - DCA interpretation
//!   - [`core::payable_status`] - Online payability
//!   - [`core::integrity`] - Integrity tokens
//! - [`io`] - Ledger CSV readers, account grouping and output writers
//! - [`strategy`] - Sync and async processing pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`telemetry`] - Logging set-up
//!
//! # Regimes
//!
//! - **Late filing** (`LATE_FILING`, references starting with `A`)
//! - **Sanctions** (`SANCTIONS`, references starting with `P`)
//! - **Overseas entity sanctions** (`SANCTIONS_ROE`, references starting with `U`)
//!
//! # Payable Status
//!
//! A line is `open` only when it is an unpaid penalty, not with a debt
//! collection agency, and the only surviving line on the account. Every
//! other line is `closed`.
//!
//! # Reloading Reference Data
//!
//! The CLI loads reference data once per run. Long-lived callers keep a
//! [`ReferenceStore`] and call [`ReferenceStore::reload`] between exports;
//! contexts built from [`ReferenceStore::current`] before the reload keep
//! the data they started with.
//!
//! ```no_run
//! use penalty_ledger_engine::cli::StrategyType;
//! use penalty_ledger_engine::strategy::{create_strategy, StrategyContext};
//! use penalty_ledger_engine::{EngineError, ReferencePaths, ReferenceStore};
//! use std::path::Path;
//!
//! fn main() -> Result<(), EngineError> {
//!     let store = ReferenceStore::load(ReferencePaths::default(), &[] as &[&str])?;
//!
//!     for export in ["monday.csv", "tuesday.csv"] {
//!         let context = StrategyContext::new(store.current());
//!         let strategy = create_strategy(StrategyType::Sync, context, None);
//!         strategy.process(Path::new(export), &mut std::io::stdout())?;
//!         store.reload()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use config::{ReferenceData, ReferencePaths, ReferenceStore};
pub use crate::core::{
    PayableStatusProvider, ReasonProvider, TokenGenerator, TransactionListGenerator,
};
pub use io::{write_transaction_lists_csv, write_transaction_lists_json};
pub use types::{
    ChargeCategory, CustomerAccountSnapshot, CustomerTransactionList, EngineError, LedgerLine,
    PayableStatus, Regime, TransactionList, TransactionListItem,
};
