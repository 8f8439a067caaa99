//! Builders shared by the core unit tests

use crate::config::{
    AllowedTransactionRegistry, AllowedTransactions, NotificationMetadata, PenaltyTypeCatalogue,
    PenaltyTypeConfig, ReferenceData, RegimeDescriptor, RegimeDescriptorCatalogue,
};
use crate::core::reason::LATE_FILING_REASON;
use crate::types::{LedgerLine, Regime};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const CS_REASON: &str = "Failure to file a confirmation statement";
pub const ROE_REASON: &str = "Failure to update the Register of Overseas Entities";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Unpaid late-filing line of 250 with a padded PEN1 dunning status
pub fn line(reference: &str, transaction_type: &str, subtype: &str) -> LedgerLine {
    LedgerLine {
        company_code: "LP".to_string(),
        ledger_code: "EW".to_string(),
        customer_code: "12345678".to_string(),
        transaction_reference: reference.to_string(),
        transaction_date: date(2025, 2, 25),
        made_up_date: date(2024, 2, 12),
        due_date: date(2025, 3, 26),
        amount: Decimal::new(250, 0),
        outstanding_amount: Decimal::new(250, 0),
        is_paid: false,
        transaction_type: transaction_type.to_string(),
        transaction_subtype: subtype.to_string(),
        type_description: "Penalty Ref".to_string(),
        account_status: "CHS".to_string(),
        dunning_status: "PEN1        ".to_string(),
    }
}

pub fn descriptor(kind: &str) -> RegimeDescriptor {
    RegimeDescriptor {
        description: "Penalty Payment".to_string(),
        description_id: "penalty".to_string(),
        class_of_payment: "penalty".to_string(),
        kind: kind.to_string(),
        product_type: "penalty".to_string(),
        notification: NotificationMetadata {
            app_id: "penalty-payment-api.penalty_payment_received_email".to_string(),
            message_type: "penalty_payment_received_email".to_string(),
        },
    }
}

/// Reference data covering all three regimes
pub fn reference_data() -> ReferenceData {
    let allowed = AllowedTransactionRegistry::new()
        .with_regime(
            Regime::LateFiling,
            AllowedTransactions::from_pairs([("1", "EU"), ("1", "EJ"), ("1", "Other")]),
        )
        .with_regime(
            Regime::Sanctions,
            AllowedTransactions::from_pairs([("1", "S1"), ("1", "S2"), ("2", "S1")]),
        )
        .with_regime(
            Regime::SanctionsRoe,
            AllowedTransactions::from_pairs([("1", "A2")]),
        );

    let descriptors = RegimeDescriptorCatalogue::new("penalty details")
        .with_descriptor(Regime::LateFiling, descriptor("penalty#late-filing"))
        .with_descriptor(Regime::Sanctions, descriptor("penalty#sanctions"))
        .with_descriptor(Regime::SanctionsRoe, descriptor("penalty#sanctions"));

    let penalty_types = PenaltyTypeCatalogue::new(vec![
        PenaltyTypeConfig::new(Regime::LateFiling, "1", "EU", LATE_FILING_REASON),
        PenaltyTypeConfig::new(Regime::LateFiling, "1", "EJ", LATE_FILING_REASON),
        PenaltyTypeConfig::new(Regime::Sanctions, "1", "S1", CS_REASON),
        PenaltyTypeConfig::new(Regime::SanctionsRoe, "1", "A2", ROE_REASON),
    ]);

    ReferenceData::new(allowed, descriptors, penalty_types)
}
