//! Regime descriptors
//!
//! One descriptor per regime, carrying the display kind stamped on every
//! transaction list item plus the payment and notification metadata used by
//! the surrounding system. Keys follow the ledger team's YAML format.

use crate::types::Regime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Receipt notification settings for a regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMetadata {
    #[serde(rename = "EmailReceivedAppId")]
    pub app_id: String,

    #[serde(rename = "EmailMsgType")]
    pub message_type: String,
}

/// Static description of a regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeDescriptor {
    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "DescriptionId")]
    pub description_id: String,

    /// Payment classification passed to the payments platform
    #[serde(rename = "ClassOfPayment")]
    pub class_of_payment: String,

    /// Display kind, e.g. `penalty#sanctions`
    #[serde(rename = "ResourceKind")]
    pub kind: String,

    #[serde(rename = "ProductType")]
    pub product_type: String,

    #[serde(flatten)]
    pub notification: NotificationMetadata,
}

/// Descriptor catalogue keyed by regime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimeDescriptorCatalogue {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    details: BTreeMap<Regime, RegimeDescriptor>,
}

impl RegimeDescriptorCatalogue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_descriptor(mut self, regime: Regime, descriptor: RegimeDescriptor) -> Self {
        self.details.insert(regime, descriptor);
        self
    }

    pub fn get(&self, regime: Regime) -> Option<&RegimeDescriptor> {
        self.details.get(&regime)
    }

    /// Check every descriptor carries a display kind
    pub fn validate(&self) -> Result<(), String> {
        match self
            .details
            .iter()
            .find(|(_, descriptor)| descriptor.kind.trim().is_empty())
        {
            Some((regime, _)) => Err(format!("descriptor for {regime} has an empty ResourceKind")),
            None => Ok(()),
        }
    }
}
