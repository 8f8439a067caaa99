//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates generation by coordinating:
//! - CSV parsing via `SyncReader` (iterator interface)
//! - grouping into account snapshots via `SnapshotGrouper`
//! - generation via the context's `TransactionListGenerator`
//! - output via the context's writer
//!
//! Snapshots are only complete once the whole export has been read, so lines
//! are held in memory until the end of the file.

use crate::io::snapshot::SnapshotGrouper;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, StrategyContext};
use crate::types::EngineError;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use penalty_ledger_engine::config::{ReferenceData, ReferencePaths};
/// use penalty_ledger_engine::strategy::{ProcessingStrategy, StrategyContext, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let reference = ReferenceData::load(&ReferencePaths::default(), &[] as &[&str]).unwrap();
/// let strategy = SyncProcessingStrategy::new(StrategyContext::new(Arc::new(reference)));
///
/// strategy
///     .process(Path::new("ledger.csv"), &mut std::io::stdout())
///     .expect("Processing failed");
/// ```
#[derive(Clone)]
pub struct SyncProcessingStrategy {
    context: StrategyContext,
}

impl SyncProcessingStrategy {
    pub fn new(context: StrategyContext) -> Self {
        Self { context }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process a ledger export and write the transaction lists
    ///
    /// 1. Streams ledger lines from the CSV file, skipping malformed rows
    /// 2. Groups them into account snapshots
    /// 3. Generates a list per snapshot in first-seen order
    /// 4. Writes all lists to output
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError> {
        let reader = SyncReader::new(input_path)?;
        let mut grouper = SnapshotGrouper::new();

        for result in reader {
            match result {
                Ok(line) => grouper.push(line),
                Err(e) => warn!(error = %e, "Skipping ledger row"),
            }
        }

        let snapshots = grouper.finish();
        debug!(accounts = snapshots.len(), "Grouped ledger lines");

        let mut lists = Vec::with_capacity(snapshots.len());
        for snapshot in &snapshots {
            if let Some(list) = self.context.generate(snapshot)? {
                lists.push(list);
            }
        }

        self.context.write(&lists, output)
    }
}
