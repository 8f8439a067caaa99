//! Core business logic module
//!
//! This module contains the transaction list generation components:
//! - `traits` - Capability traits for swappable policies
//! - `engine` - Transaction list assembly
//! - `eligibility` - Allow-list filtering
//! - `classifier` - Penalty / other classification
//! - `reason` - Reason resolution
//! - `dunning` - Dunning status and DCA interpretation
//! - `payable_status` - Online payability
//! - `integrity` - Integrity token generation

pub mod classifier;
pub mod dunning;
pub mod eligibility;
pub mod engine;
pub mod integrity;
pub mod payable_status;
pub mod reason;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::{classify, LineClassification};
pub use dunning::{is_dca, DunningStatus, DCA_SENTINEL};
pub use eligibility::filter_eligible;
pub use engine::TransactionListGenerator;
pub use integrity::{FixedTokenGenerator, RandomTokenGenerator};
pub use payable_status::DefaultPayableStatusProvider;
pub use reason::{DefaultReasonProvider, FALLBACK_REASON, LATE_FILING_REASON};
pub use traits::{ClassifiedLine, PayableStatusProvider, ReasonProvider, TokenGenerator};
