//! Penalty Ledger Engine CLI
//!
//! Command-line interface for generating penalty transaction lists from a
//! finance ledger CSV export.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > lists.csv
//! cargo run -- --regime sanctions --format json ledger.csv > lists.json
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv > lists.csv
//! cargo run -- --disabled-subtypes S1,A2 --log-level debug ledger.csv
//! ```
//!
//! Reference data is read from `assets/` unless overridden. Lists go to
//! stdout, logs to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid reference data, output not writable, etc.)

use penalty_ledger_engine::cli;
use penalty_ledger_engine::config::ReferenceStore;
use penalty_ledger_engine::strategy::{self, StrategyContext};
use penalty_ledger_engine::telemetry;
use std::process;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = telemetry::init(&args.log_level) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let store = match ReferenceStore::load(args.reference_paths(), &args.disabled_subtypes()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let context = StrategyContext::new(store.current())
        .with_regime(args.regime)
        .with_format(args.format);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), context, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
