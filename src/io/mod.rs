//! I/O module
//!
//! Handles ledger CSV parsing and transaction list output.
//!
//! # Components
//!
//! - `csv_format` - Record conversion and output serialization
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `snapshot` - Grouping of ledger lines into account snapshots

pub mod async_reader;
pub mod csv_format;
pub mod snapshot;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_ledger_record, write_transaction_lists_csv, write_transaction_lists_json,
    LedgerCsvRecord,
};
pub use snapshot::{group_into_snapshots, SnapshotGrouper};
pub use sync_reader::SyncReader;
