//! Line classifier
//!
//! A line is a penalty when its (transaction type, subtype) pair is in the
//! active regime's penalty-bearing set. Everything else, including unknown
//! subtypes, is an incidental cost.

use crate::config::{PenaltySubtypeSet, RegimeDescriptor};
use crate::types::{ChargeCategory, LedgerLine};

/// Category and display kind of one ledger line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassification {
    pub category: ChargeCategory,
    pub kind: String,
}

/// Classify one ledger line
///
/// # Arguments
///
/// * `line` - The ledger line to classify
/// * `penalty_subtypes` - Penalty-bearing pairs of the active regime
/// * `descriptor` - Descriptor of the active regime, source of the display kind
///
/// # Returns
///
/// The category and display kind; never fails
pub fn classify(
    line: &LedgerLine,
    penalty_subtypes: &PenaltySubtypeSet,
    descriptor: &RegimeDescriptor,
) -> LineClassification {
    let category = if penalty_subtypes.contains(&line.transaction_type, &line.transaction_subtype) {
        ChargeCategory::Penalty
    } else {
        ChargeCategory::Other
    };

    LineClassification {
        category,
        kind: descriptor.kind.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{descriptor, line};
    use rstest::rstest;

    #[rstest]
    #[case::penalty_subtype("1", "EU", ChargeCategory::Penalty)]
    #[case::padded_subtype("1", "EU ", ChargeCategory::Penalty)]
    #[case::cost_line("1", "Other", ChargeCategory::Other)]
    #[case::non_invoice_type("2", "EU", ChargeCategory::Other)]
    #[case::empty_subtype("1", "", ChargeCategory::Other)]
    fn test_classify(
        #[case] transaction_type: &str,
        #[case] subtype: &str,
        #[case] expected: ChargeCategory,
    ) {
        let penalty_subtypes = PenaltySubtypeSet::from_pairs([("1", "EU"), ("1", "EJ")]);
        let classification = classify(
            &line("A0000001", transaction_type, subtype),
            &penalty_subtypes,
            &descriptor("penalty#late-filing"),
        );

        assert_eq!(classification.category, expected);
        assert_eq!(classification.kind, "penalty#late-filing");
    }
}
