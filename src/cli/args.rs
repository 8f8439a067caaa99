use crate::config::{parse_subtype_list, ReferencePaths};
use crate::config::reference_data::{
    DEFAULT_ALLOWED_TRANSACTIONS_PATH, DEFAULT_PENALTY_DETAILS_PATH, DEFAULT_PENALTY_TYPES_PATH,
};
use crate::strategy::BatchConfig;
use crate::types::Regime;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generate penalty transaction lists from a finance ledger export
#[derive(Parser, Debug)]
#[command(name = "penalty-ledger-engine")]
#[command(about = "Generate penalty transaction lists from a finance ledger export", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger lines
    #[arg(value_name = "INPUT", help = "Path to the ledger CSV export")]
    pub input_file: PathBuf,

    /// Regime to generate every list for
    #[arg(
        long = "regime",
        value_name = "REGIME",
        value_parser = parse_regime,
        help = "Force a regime (late-filing, sanctions, sanctions-roe); inferred per account when omitted"
    )]
    pub regime: Option<Regime>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Output format
    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Number of ledger lines per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of ledger lines per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of accounts generated concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of accounts generated concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    #[arg(long = "allowed-transactions", value_name = "FILE", default_value = DEFAULT_ALLOWED_TRANSACTIONS_PATH)]
    pub allowed_transactions: PathBuf,

    #[arg(long = "penalty-details", value_name = "FILE", default_value = DEFAULT_PENALTY_DETAILS_PATH)]
    pub penalty_details: PathBuf,

    #[arg(long = "penalty-types", value_name = "FILE", default_value = DEFAULT_PENALTY_TYPES_PATH)]
    pub penalty_types: PathBuf,

    /// Comma separated subtypes to treat as not penalty-bearing, e.g. "S1,A2"
    #[arg(long = "disabled-subtypes", value_name = "SUBTYPES", default_value = "")]
    pub disabled_subtypes: String,

    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

fn parse_regime(value: &str) -> Result<Regime, String> {
    value.parse::<Regime>().map_err(|e| e.to_string())
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults. Zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent.unwrap_or(default.max_concurrent),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn reference_paths(&self) -> ReferencePaths {
        ReferencePaths {
            allowed_transactions: self.allowed_transactions.clone(),
            penalty_details: self.penalty_details.clone(),
            penalty_types: self.penalty_types.clone(),
        }
    }

    pub fn disabled_subtypes(&self) -> Vec<String> {
        parse_subtype_list(&self.disabled_subtypes)
    }
}
