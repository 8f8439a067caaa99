//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of ledger lines for the async pipeline.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerLines
//!                  ↓
//!           csv_format module
//!           (LedgerCsvRecord, convert_ledger_record)
//! ```

use crate::io::csv_format::{convert_ledger_record, LedgerCsvRecord};
use crate::types::LedgerLine;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous ledger CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// Only headers are trimmed, matching the synchronous reader.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::Headers)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read a batch of ledger lines
    ///
    /// Reads up to `batch_size` rows. Rows that fail to parse or convert are
    /// logged with their line number and skipped; they do not count towards
    /// the batch size.
    ///
    /// # Returns
    ///
    /// The converted lines in file order. Empty once the end of the file is
    /// reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerLine> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<LedgerCsvRecord>();

        while batch.len() < batch_size {
            let next = match records.next().await {
                Some(next) => next,
                None => break,
            };
            self.line_num += 1;

            match next {
                Ok(record) => match convert_ledger_record(record) {
                    Ok(line) => batch.push(line),
                    Err(e) => warn!(line = self.line_num, error = %e, "Skipping ledger row"),
                },
                Err(e) => warn!(line = self.line_num, error = %e, "Skipping malformed CSV row"),
            }
        }

        batch
    }
}
