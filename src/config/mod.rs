//! Reference data
//!
//! - `allowed_transactions`: per-regime allow-list of (type, subtype) pairs
//! - `regime_descriptor`: display kind and payment metadata per regime
//! - `penalty_types`: penalty-bearing subtypes and the reason table
//! - `reference_data`: file loading and the hot-swappable store

pub mod allowed_transactions;
pub mod penalty_types;
pub mod reference_data;
pub mod regime_descriptor;

pub use allowed_transactions::{AllowedTransactionRegistry, AllowedTransactions};
pub use penalty_types::{
    parse_subtype_list, PenaltyReasonTable, PenaltySubtypeSet, PenaltyTypeCatalogue,
    PenaltyTypeConfig,
};
pub use reference_data::{ReferenceData, ReferencePaths, ReferenceStore};
pub use regime_descriptor::{NotificationMetadata, RegimeDescriptor, RegimeDescriptorCatalogue};
