//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── SnapshotGrouper (accounts across batches)
//!     └── tokio tasks (one generation per account, bounded, ordered)
//! ```
//!
//! Batches are read sequentially and fed into one grouper, so an account
//! spanning several batches still becomes a single snapshot. Generation then
//! runs on the tokio multi-threaded runtime with at most `max_concurrent`
//! accounts in flight. Results are collected in snapshot order, making the
//! output identical to the synchronous strategy.

use crate::io::async_reader::AsyncReader;
use crate::io::snapshot::SnapshotGrouper;
use crate::strategy::{ProcessingStrategy, StrategyContext};
use crate::types::EngineError;
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of ledger lines per read batch
    pub batch_size: usize,
    /// Maximum number of accounts generated concurrently
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                max_concurrent,
                default = default.max_concurrent,
                "Invalid max_concurrent, using default"
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Clone)]
pub struct AsyncProcessingStrategy {
    context: Arc<StrategyContext>,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `context` - Reference data, generator and output settings
    /// * `config` - BatchConfig with batch_size and max_concurrent
    pub fn new(context: StrategyContext, config: BatchConfig) -> Self {
        Self {
            context: Arc::new(context),
            config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process a ledger export and write the transaction lists
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads ledger lines in batches using AsyncReader
    /// 3. Groups them into account snapshots
    /// 4. Generates lists concurrently, keeping snapshot order
    /// 5. Writes all lists to output
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError> {
        if !input_path.exists() {
            return Err(EngineError::FileNotFound {
                path: input_path.display().to_string(),
            });
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| EngineError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let lists = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path).await?;
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut grouper = SnapshotGrouper::new();
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                grouper.extend(batch);
            }

            let snapshots = grouper.finish();
            debug!(accounts = snapshots.len(), "Grouped ledger lines");

            let results: Vec<_> = stream::iter(snapshots.into_iter().map(|snapshot| {
                let context = Arc::clone(&self.context);
                tokio::spawn(async move { context.generate(&snapshot) })
            }))
            .buffered(self.config.max_concurrent)
            .collect()
            .await;

            let mut lists = Vec::with_capacity(results.len());
            for joined in results {
                let generated = joined.map_err(|e| EngineError::IoError {
                    message: format!("Generation task failed: {}", e),
                })??;
                if let Some(list) = generated {
                    lists.push(list);
                }
            }
            Ok::<_, EngineError>(lists)
        })?;

        self.context.write(&lists, output)
    }
}
