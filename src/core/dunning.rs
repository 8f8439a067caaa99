//! Dunning status interpretation
//!
//! The ledger delivers the dunning status as fixed-width text right-padded
//! with spaces. Only the debt collection agency state affects payability.

use std::str::FromStr;

/// Dunning text marking a line as handed to a debt collection agency
pub const DCA_SENTINEL: &str = "DCA";

/// Known dunning states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DunningStatus {
    /// First penalty reminder
    Pen1,
    /// Second penalty reminder
    Pen2,
    /// Final penalty reminder
    Pen3,
    /// Handed to a debt collection agency
    Dca,
    /// No dunning activity
    None,
    /// Any other text, kept as delivered after trimming
    Unknown(String),
}

impl FromStr for DunningStatus {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim() {
            "" => DunningStatus::None,
            DCA_SENTINEL => DunningStatus::Dca,
            "PEN1" => DunningStatus::Pen1,
            "PEN2" => DunningStatus::Pen2,
            "PEN3" => DunningStatus::Pen3,
            other => DunningStatus::Unknown(other.to_string()),
        })
    }
}

impl DunningStatus {
    pub fn is_dca(&self) -> bool {
        matches!(self, DunningStatus::Dca)
    }
}

/// Whether raw dunning text marks a line as under DCA handling
///
/// The comparison is case-sensitive after trimming padding.
pub fn is_dca(raw_dunning_status: &str) -> bool {
    raw_dunning_status
        .parse::<DunningStatus>()
        .is_ok_and(|status| status.is_dca())
}
