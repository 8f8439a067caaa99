//! Transaction list generation
//!
//! This module provides the TransactionListGenerator that turns a customer's
//! account snapshot into a normalized transaction list by composing the
//! per-line components:
//!
//! - eligibility filtering against the regime's allow-list
//! - classification and display kind
//! - reason, DCA flag and payable status
//! - integrity tokens for the list and every item
//!
//! Generation is a pure transform apart from the token generator. Reference
//! data is passed in on every call and never cached here.

use super::classifier::classify;
use super::dunning::is_dca;
use super::eligibility::filter_eligible;
use super::integrity::RandomTokenGenerator;
use super::payable_status::DefaultPayableStatusProvider;
use super::reason::DefaultReasonProvider;
use super::traits::{ClassifiedLine, PayableStatusProvider, ReasonProvider, TokenGenerator};
use crate::config::{
    AllowedTransactionRegistry, PenaltyReasonTable, PenaltySubtypeSet, PenaltyTypeCatalogue,
    ReferenceData, RegimeDescriptor, RegimeDescriptorCatalogue,
};
use crate::types::{
    CustomerAccountSnapshot, EngineError, LedgerLine, Regime, TransactionList,
    TransactionListItem,
};
use std::sync::Arc;
use tracing::debug;

/// Transaction list generator
///
/// Holds the swappable reason, payable-status and token policies. The
/// generator itself is immutable and can be shared between threads.
#[derive(Clone)]
pub struct TransactionListGenerator {
    reason_provider: Arc<dyn ReasonProvider>,
    payable_status_provider: Arc<dyn PayableStatusProvider>,
    token_generator: Arc<dyn TokenGenerator>,
}

impl Default for TransactionListGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionListGenerator {
    /// Create a generator with the default policies
    ///
    /// # Returns
    ///
    /// A generator using [`DefaultReasonProvider`],
    /// [`DefaultPayableStatusProvider`] and [`RandomTokenGenerator`]
    pub fn new() -> Self {
        Self {
            reason_provider: Arc::new(DefaultReasonProvider),
            payable_status_provider: Arc::new(DefaultPayableStatusProvider),
            token_generator: Arc::new(RandomTokenGenerator),
        }
    }

    pub fn with_reason_provider(mut self, provider: Arc<dyn ReasonProvider>) -> Self {
        self.reason_provider = provider;
        self
    }

    pub fn with_payable_status_provider(mut self, provider: Arc<dyn PayableStatusProvider>) -> Self {
        self.payable_status_provider = provider;
        self
    }

    pub fn with_token_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.token_generator = generator;
        self
    }

    /// Generate the transaction list for one account snapshot
    ///
    /// The list token is generated first, then one token per surviving line in
    /// order. The first token failure aborts the call and drops every item
    /// built so far.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The customer's ledger lines
    /// * `regime` - The regime to generate for
    /// * `descriptors` - Regime descriptors, source of the display kind
    /// * `allowlist` - Allowed (type, subtype) pairs per regime
    /// * `penalty_types` - Penalty-bearing subtypes and the reason table
    ///
    /// # Returns
    ///
    /// * `Ok(TransactionList)` - One item per surviving line, in input order
    /// * `Err(EngineError)` - No list was produced
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The regime has no descriptor or no allow-list section
    /// - The token generator fails on any call
    pub fn generate_transaction_list(
        &self,
        snapshot: &CustomerAccountSnapshot,
        regime: Regime,
        descriptors: &RegimeDescriptorCatalogue,
        allowlist: &AllowedTransactionRegistry,
        penalty_types: &PenaltyTypeCatalogue,
    ) -> Result<TransactionList, EngineError> {
        let descriptor = descriptors
            .get(regime)
            .ok_or_else(|| EngineError::configuration_missing(regime, "regime descriptor"))?;
        let allowed = allowlist
            .for_regime(regime)
            .ok_or_else(|| EngineError::configuration_missing(regime, "allowed transactions"))?;

        let eligible = filter_eligible(&snapshot.lines, allowed);
        let surviving_lines = eligible.len();
        let penalty_subtypes = penalty_types.penalty_subtypes(regime);
        let reasons = penalty_types.reason_table();

        let list_etag = self.token_generator.generate()?;

        let items = eligible
            .into_iter()
            .map(|line| {
                self.assemble_item(
                    line,
                    regime,
                    surviving_lines,
                    descriptor,
                    &penalty_subtypes,
                    reasons,
                )
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        debug!(
            customer_code = %snapshot.customer_code,
            company_code = %snapshot.company_code,
            %regime,
            lines = snapshot.lines.len(),
            items = items.len(),
            "Generated transaction list"
        );

        Ok(TransactionList::new(list_etag, items))
    }

    /// Generate using a loaded [`ReferenceData`] bundle
    pub fn generate_from_reference(
        &self,
        snapshot: &CustomerAccountSnapshot,
        regime: Regime,
        reference: &ReferenceData,
    ) -> Result<TransactionList, EngineError> {
        self.generate_transaction_list(
            snapshot,
            regime,
            &reference.descriptors,
            &reference.allowed_transactions,
            &reference.penalty_types,
        )
    }

    fn assemble_item(
        &self,
        line: &LedgerLine,
        regime: Regime,
        surviving_lines: usize,
        descriptor: &RegimeDescriptor,
        penalty_subtypes: &PenaltySubtypeSet,
        reasons: &PenaltyReasonTable,
    ) -> Result<TransactionListItem, EngineError> {
        let classification = classify(line, penalty_subtypes, descriptor);
        let reason = self.reason_provider.reason(line, regime, reasons);
        let is_dca = is_dca(&line.dunning_status);
        let payable_status = self.payable_status_provider.payable_status(
            &ClassifiedLine {
                is_paid: line.is_paid,
                is_dca,
                category: classification.category,
            },
            surviving_lines,
        );
        let etag = self.token_generator.generate()?;

        Ok(TransactionListItem {
            id: line.transaction_reference.clone(),
            etag,
            kind: classification.kind,
            is_paid: line.is_paid,
            is_dca,
            due_date: line.due_date,
            made_up_date: line.made_up_date,
            transaction_date: line.transaction_date,
            original_amount: line.amount,
            outstanding: line.outstanding_amount,
            category: classification.category,
            reason,
            payable_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::integrity::FixedTokenGenerator;
    use crate::core::reason::{FALLBACK_REASON, LATE_FILING_REASON};
    use crate::core::test_support::{line, reference_data, CS_REASON, ROE_REASON};
    use crate::types::{ChargeCategory, PayableStatus, TokenError};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Succeeds until the configured call, counting every call
    struct FailingOnCall {
        fail_on: usize,
        calls: AtomicUsize,
    }

    impl FailingOnCall {
        fn new(fail_on: usize) -> Self {
            Self {
                fail_on,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TokenGenerator for FailingOnCall {
        fn generate(&self) -> Result<String, TokenError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on {
                Err(TokenError::new("error generating etag"))
            } else {
                Ok(format!("etag-{call}"))
            }
        }
    }

    /// Records the order of token requests
    #[derive(Default)]
    struct Counting {
        issued: Mutex<Vec<String>>,
    }

    impl TokenGenerator for Counting {
        fn generate(&self) -> Result<String, TokenError> {
            let mut issued = self.issued.lock().unwrap();
            let token = format!("etag-{}", issued.len() + 1);
            issued.push(token.clone());
            Ok(token)
        }
    }

    fn generator() -> TransactionListGenerator {
        TransactionListGenerator::new().with_token_generator(Arc::new(FixedTokenGenerator::new("ABCDE")))
    }

    fn snapshot(company_code: &str, lines: Vec<LedgerLine>) -> CustomerAccountSnapshot {
        let lines = lines
            .into_iter()
            .map(|mut l| {
                l.company_code = company_code.to_string();
                l
            })
            .collect();
        CustomerAccountSnapshot::new("12345678", company_code, lines)
    }

    fn unpaid(reference: &str, subtype: &str, dunning_status: &str) -> LedgerLine {
        let mut l = line(reference, "1", subtype);
        l.dunning_status = dunning_status.to_string();
        l
    }

    #[test]
    fn test_late_filing_single_penalty_is_open() {
        let snapshot = snapshot("LP", vec![unpaid("A1234567", "EU", "PEN1        ")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::LateFiling, &reference_data())
            .unwrap();

        assert_eq!(list.etag, "ABCDE");
        assert_eq!(list.total_results, 1);
        assert_eq!(list.items_per_page, 1);
        assert_eq!(list.start_index, 0);

        let item = &list.items[0];
        assert_eq!(item.id, "A1234567");
        assert_eq!(item.etag, "ABCDE");
        assert_eq!(item.kind, "penalty#late-filing");
        assert_eq!(item.category, ChargeCategory::Penalty);
        assert_eq!(item.reason, LATE_FILING_REASON);
        assert!(!item.is_dca);
        assert!(!item.is_paid);
        assert_eq!(item.original_amount, Decimal::new(250, 0));
        assert_eq!(item.outstanding, Decimal::new(250, 0));
        assert_eq!(item.payable_status, PayableStatus::Open);
    }

    #[test]
    fn test_late_filing_other_subtype_keeps_fixed_reason() {
        let snapshot = snapshot("LP", vec![unpaid("A1234567", "Other", "PEN1        ")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::LateFiling, &reference_data())
            .unwrap();

        let item = &list.items[0];
        assert_eq!(item.category, ChargeCategory::Other);
        assert_eq!(item.reason, LATE_FILING_REASON);
        assert_eq!(item.payable_status, PayableStatus::Closed);
    }

    #[test]
    fn test_sanctions_dca_penalty_is_closed() {
        let snapshot = snapshot("C1", vec![unpaid("P1234567", "S1", "DCA         ")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::Sanctions, &reference_data())
            .unwrap();

        let item = &list.items[0];
        assert_eq!(item.kind, "penalty#sanctions");
        assert_eq!(item.category, ChargeCategory::Penalty);
        assert!(item.is_dca);
        assert_eq!(item.reason, CS_REASON);
        assert_eq!(item.payable_status, PayableStatus::Closed);
    }

    #[test]
    fn test_roe_penalty_reason() {
        let snapshot = snapshot("C1", vec![unpaid("U1234567", "A2", "PEN1")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::SanctionsRoe, &reference_data())
            .unwrap();

        let item = &list.items[0];
        assert_eq!(item.category, ChargeCategory::Penalty);
        assert_eq!(item.reason, ROE_REASON);
        assert_eq!(item.payable_status, PayableStatus::Open);
    }

    #[test]
    fn test_penalty_with_cost_line_is_closed_and_ordered() {
        let mut cost = line("P7654321", "2", "S1");
        cost.company_code = "C1".to_string();
        let snapshot = snapshot(
            "C1",
            vec![
                unpaid("P1234567", "S1", "PEN1"),
                unpaid("P0000009", "ZZ", "PEN1"),
                cost,
            ],
        );

        let list = generator()
            .generate_from_reference(&snapshot, Regime::Sanctions, &reference_data())
            .unwrap();

        let ids: Vec<&str> = list.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["P1234567", "P7654321"]);
        assert_eq!(list.total_results, 2);
        assert!(list
            .items
            .iter()
            .all(|i| i.payable_status == PayableStatus::Closed));
        assert_eq!(list.items[1].category, ChargeCategory::Other);
        assert_eq!(list.items[1].reason, "");
    }

    #[test]
    fn test_uncatalogued_sanctions_subtype_falls_back() {
        let snapshot = snapshot("C1", vec![unpaid("P1234567", "S2", "PEN1")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::Sanctions, &reference_data())
            .unwrap();

        assert_eq!(list.items[0].reason, FALLBACK_REASON);
        assert_eq!(list.items[0].category, ChargeCategory::Other);
    }

    #[test]
    fn test_no_surviving_lines_still_yields_list() {
        let snapshot = snapshot("LP", vec![unpaid("A1234567", "XX", "PEN1")]);

        let list = generator()
            .generate_from_reference(&snapshot, Regime::LateFiling, &reference_data())
            .unwrap();

        assert!(list.is_empty());
        assert_eq!(list.etag, "ABCDE");
        assert_eq!(list.total_results, 0);
    }

    #[test]
    fn test_padding_does_not_change_dca_flag() {
        let padded = snapshot("C1", vec![unpaid("P1234567", "S1", "DCA      ")]);
        let bare = snapshot("C1", vec![unpaid("P1234567", "S1", "DCA")]);
        let reference = reference_data();

        let padded = generator()
            .generate_from_reference(&padded, Regime::Sanctions, &reference)
            .unwrap();
        let bare = generator()
            .generate_from_reference(&bare, Regime::Sanctions, &reference)
            .unwrap();

        assert_eq!(padded.items, bare.items);
    }

    #[test]
    fn test_missing_descriptor_is_configuration_error() {
        let mut reference = reference_data();
        reference.descriptors = RegimeDescriptorCatalogue::new("empty");
        let snapshot = snapshot("C1", vec![unpaid("U1234567", "A2", "PEN1")]);

        let result = generator().generate_from_reference(&snapshot, Regime::SanctionsRoe, &reference);

        assert_eq!(
            result.unwrap_err(),
            EngineError::configuration_missing(Regime::SanctionsRoe, "regime descriptor")
        );
    }

    #[test]
    fn test_missing_allow_list_is_configuration_error() {
        let mut reference = reference_data();
        reference.allowed_transactions = AllowedTransactionRegistry::new();
        let snapshot = snapshot("LP", vec![unpaid("A1234567", "EU", "PEN1")]);

        let result = generator().generate_from_reference(&snapshot, Regime::LateFiling, &reference);

        assert!(matches!(
            result,
            Err(EngineError::ConfigurationMissing { regime: Regime::LateFiling, .. })
        ));
    }

    #[rstest]
    #[case::list_token(1)]
    #[case::first_item_token(2)]
    #[case::last_item_token(3)]
    fn test_token_failure_discards_list(#[case] fail_on: usize) {
        let snapshot = snapshot(
            "LP",
            vec![unpaid("A1234567", "EU", "PEN1"), unpaid("A7654321", "Other", "PEN1")],
        );
        let generator = TransactionListGenerator::new()
            .with_token_generator(Arc::new(FailingOnCall::new(fail_on)));

        let result = generator.generate_from_reference(&snapshot, Regime::LateFiling, &reference_data());

        assert_eq!(
            result.unwrap_err(),
            EngineError::TokenGenerationFailed {
                message: "error generating etag".to_string()
            }
        );
    }

    #[test]
    fn test_list_token_is_requested_before_item_tokens() {
        let counting = Arc::new(Counting::default());
        let generator = TransactionListGenerator::new().with_token_generator(counting.clone());
        let snapshot = snapshot(
            "LP",
            vec![unpaid("A1234567", "EU", "PEN1"), unpaid("A7654321", "EJ", "PEN1")],
        );

        let list = generator
            .generate_from_reference(&snapshot, Regime::LateFiling, &reference_data())
            .unwrap();

        assert_eq!(list.etag, "etag-1");
        assert_eq!(list.items[0].etag, "etag-2");
        assert_eq!(list.items[1].etag, "etag-3");
        assert_eq!(counting.issued.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_injected_policies_are_used() {
        struct Fixed;
        impl ReasonProvider for Fixed {
            fn reason(&self, _: &LedgerLine, _: Regime, _: &PenaltyReasonTable) -> String {
                "custom".to_string()
            }
        }
        impl PayableStatusProvider for Fixed {
            fn payable_status(&self, _: &ClassifiedLine, _: usize) -> crate::types::PayableStatus {
                PayableStatus::Open
            }
        }

        let generator = generator()
            .with_reason_provider(Arc::new(Fixed))
            .with_payable_status_provider(Arc::new(Fixed));
        let snapshot = snapshot("LP", vec![{
            let mut paid = unpaid("A1234567", "EU", "PEN1");
            paid.is_paid = true;
            paid
        }]);

        let list = generator
            .generate_from_reference(&snapshot, Regime::LateFiling, &reference_data())
            .unwrap();

        assert_eq!(list.items[0].reason, "custom");
        assert_eq!(list.items[0].payable_status, PayableStatus::Open);
    }
}
