//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger lines from a CSV export.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LedgerLine, EngineError>` for each CSV row:
//!
//! ```no_run
//! use penalty_ledger_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(line) => println!("Ledger line: {}", line.transaction_reference),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants carrying the line number
//!
//! # Whitespace
//!
//! Only headers are trimmed by the reader. The ledger pads some fields to a
//! fixed width and that padding must reach the conversion step intact.

use crate::io::csv_format::{convert_ledger_record, LedgerCsvRecord};
use crate::types::{EngineError, LedgerLine};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous ledger CSV reader
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl SyncReader<File> {
    /// Create a new SyncReader from a file path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ledger CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(EngineError::FileNotFound)` if the file does not exist
    /// * `Err(EngineError::IoError)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Err(EngineError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SyncReader<R> {
    /// Create a reader over any byte source
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<LedgerLine, EngineError>;

    /// Get the next ledger line
    ///
    /// # Returns
    ///
    /// * `Some(Ok(LedgerLine))` - Successfully parsed line
    /// * `Some(Err(EngineError::ParseError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<LedgerCsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;

        Some(match next {
            Ok(record) => convert_ledger_record(record).map_err(|e| EngineError::ParseError {
                line: Some(self.line_num),
                message: e.to_string(),
            }),
            Err(e) => Err(EngineError::ParseError {
                line: Some(self.line_num),
                message: e.to_string(),
            }),
        })
    }
}
