//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete generation pipelines,
//! from reading a ledger export to writing the transaction lists. Different
//! implementations (synchronous, asynchronous batch) can be selected at runtime
//! and produce the same output for the same input, apart from fresh tokens.

use crate::cli::{OutputFormat, StrategyType};
use crate::config::ReferenceData;
use crate::core::TransactionListGenerator;
use crate::io::csv_format::{write_transaction_lists_csv, write_transaction_lists_json};
use crate::types::{CustomerAccountSnapshot, CustomerTransactionList, EngineError, Regime};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete generation pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Generate transaction lists for every account in the input file
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the ledger CSV export
    /// * `output` - Writer receiving the generated lists
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the run completed, possibly with skipped rows or accounts
    /// * `Err(EngineError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - Output cannot be written
    ///
    /// Malformed rows are logged and skipped. Accounts whose regime cannot be
    /// determined, whose configuration is missing or whose token generation
    /// fails are logged and left out of the output.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError>;
}

/// Everything a strategy needs besides the input file
#[derive(Clone)]
pub struct StrategyContext {
    pub reference: Arc<ReferenceData>,
    pub generator: TransactionListGenerator,
    /// Regime forced for every account; inferred per account when `None`
    pub regime: Option<Regime>,
    pub format: OutputFormat,
}

impl StrategyContext {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            generator: TransactionListGenerator::new(),
            regime: None,
            format: OutputFormat::Csv,
        }
    }

    pub fn with_generator(mut self, generator: TransactionListGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_regime(mut self, regime: Option<Regime>) -> Self {
        self.regime = regime;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Regime for a snapshot
    ///
    /// The forced regime wins. Otherwise the first line with a known reference
    /// prefix decides; cost lines may carry references of their own. With no
    /// such line the company code decides.
    pub fn resolve_regime(&self, snapshot: &CustomerAccountSnapshot) -> Result<Regime, EngineError> {
        if let Some(regime) = self.regime {
            return Ok(regime);
        }

        snapshot
            .lines
            .iter()
            .find_map(|line| Regime::from_transaction_reference(&line.transaction_reference))
            .or_else(|| Regime::for_company_code(&snapshot.company_code))
            .ok_or_else(|| EngineError::unknown_regime(&snapshot.company_code))
    }

    /// Generate the list for one snapshot
    ///
    /// # Returns
    ///
    /// * `Ok(Some(list))` - The list was generated
    /// * `Ok(None)` - The snapshot was skipped; the reason has been logged
    /// * `Err(EngineError)` - A non call-scoped failure
    pub fn generate(
        &self,
        snapshot: &CustomerAccountSnapshot,
    ) -> Result<Option<CustomerTransactionList>, EngineError> {
        let outcome = self.resolve_regime(snapshot).and_then(|regime| {
            self.generator
                .generate_from_reference(snapshot, regime, &self.reference)
                .map(|list| (regime, list))
        });

        match outcome {
            Ok((regime, list)) => Ok(Some(CustomerTransactionList {
                customer_code: snapshot.customer_code.clone(),
                company_code: snapshot.company_code.clone(),
                regime,
                list,
            })),
            Err(e @ EngineError::UnknownRegime { .. }) => {
                warn!(
                    customer_code = %snapshot.customer_code,
                    company_code = %snapshot.company_code,
                    error = %e,
                    "Skipping account with no determinable regime"
                );
                Ok(None)
            }
            Err(e) if e.is_call_scoped() => {
                error!(
                    customer_code = %snapshot.customer_code,
                    company_code = %snapshot.company_code,
                    error = %e,
                    "Transaction list generation failed"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write the generated lists in the configured format
    pub fn write(
        &self,
        lists: &[CustomerTransactionList],
        output: &mut dyn Write,
    ) -> Result<(), EngineError> {
        match self.format {
            OutputFormat::Csv => write_transaction_lists_csv(lists, output),
            OutputFormat::Json => write_transaction_lists_json(lists, output),
        }
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `context` - Reference data, generator and output settings
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    context: StrategyContext,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(context)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(context, config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedTokenGenerator;
    use crate::core::test_support::{line, reference_data};
    use crate::types::TokenError;
    use crate::core::TokenGenerator;
    use rstest::rstest;

    struct Broken;

    impl TokenGenerator for Broken {
        fn generate(&self) -> Result<String, TokenError> {
            Err(TokenError::new("entropy source unavailable"))
        }
    }

    fn context() -> StrategyContext {
        StrategyContext::new(Arc::new(reference_data())).with_generator(
            TransactionListGenerator::new().with_token_generator(Arc::new(FixedTokenGenerator::new("ETAG"))),
        )
    }

    fn snapshot(reference: &str, company_code: &str, subtype: &str) -> CustomerAccountSnapshot {
        let mut l = line(reference, "1", subtype);
        l.company_code = company_code.to_string();
        CustomerAccountSnapshot::new("12345678", company_code, vec![l])
    }

    #[test]
    fn test_regime_inferred_from_reference() {
        let list = context()
            .generate(&snapshot("U1234567", "C1", "A2"))
            .unwrap()
            .unwrap();

        assert_eq!(list.regime, Regime::SanctionsRoe);
        assert_eq!(list.list.items.len(), 1);
    }

    #[test]
    fn test_forced_regime_wins() {
        let list = context()
            .with_regime(Some(Regime::Sanctions))
            .generate(&snapshot("U1234567", "C1", "S1"))
            .unwrap()
            .unwrap();

        assert_eq!(list.regime, Regime::Sanctions);
    }

    #[test]
    fn test_unknown_prefix_and_company_is_skipped() {
        assert_eq!(context().generate(&snapshot("Z1234567", "ZZ", "S1")).unwrap(), None);
    }

    #[test]
    fn test_cost_line_first_does_not_hide_penalty() {
        let mut cost = line("F1", "2", "S1");
        cost.company_code = "C1".to_string();
        let mut penalty = line("P1234567", "1", "S1");
        penalty.company_code = "C1".to_string();
        let snapshot = CustomerAccountSnapshot::new("12345678", "C1", vec![cost, penalty]);

        let list = context().generate(&snapshot).unwrap().unwrap();

        assert_eq!(list.regime, Regime::Sanctions);
        let ids: Vec<&str> = list.list.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["F1", "P1234567"]);
    }

    #[rstest]
    #[case::late_filing_company("LP", Regime::LateFiling)]
    #[case::sanctions_company("C1", Regime::Sanctions)]
    fn test_regime_falls_back_to_company_code(#[case] company_code: &str, #[case] expected: Regime) {
        let snapshot = snapshot("F1", company_code, "EU");

        assert_eq!(context().resolve_regime(&snapshot).unwrap(), expected);
    }

    #[test]
    fn test_token_failure_is_skipped() {
        let context = context()
            .with_generator(TransactionListGenerator::new().with_token_generator(Arc::new(Broken)));

        assert_eq!(context.generate(&snapshot("A1234567", "LP", "EU")).unwrap(), None);
    }
}
