//! CSV format handling for ledger exports and transaction list output
//!
//! This module centralizes all format concerns, providing:
//! - LedgerCsvRecord structure for deserialization
//! - Conversion from CSV records to ledger lines
//! - Transaction list serialization to CSV and JSON
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{CustomerTransactionList, EngineError, LedgerLine};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Date format used by the ledger export
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column names of the transaction list CSV output
pub const OUTPUT_HEADER: [&str; 16] = [
    "customer_code",
    "company_code",
    "list_etag",
    "id",
    "etag",
    "kind",
    "is_paid",
    "is_dca",
    "due_date",
    "made_up_date",
    "transaction_date",
    "original_amount",
    "outstanding",
    "type",
    "reason",
    "payable_status",
];

/// CSV record structure for deserialization
///
/// Every field is read as text. Typed conversion happens in
/// [`convert_ledger_record`] so a bad value can be reported with the
/// transaction reference it belongs to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LedgerCsvRecord {
    pub company_code: String,
    pub ledger_code: String,
    pub customer_code: String,
    pub transaction_reference: String,
    pub transaction_date: String,
    pub made_up_date: String,
    pub due_date: String,
    pub amount: String,
    pub outstanding_amount: String,
    pub is_paid: String,
    pub transaction_type: String,
    pub transaction_subtype: String,
    #[serde(default)]
    pub type_description: String,
    #[serde(default)]
    pub account_status: String,
    #[serde(default)]
    pub dunning_status: String,
}

/// Convert a LedgerCsvRecord to a LedgerLine
///
/// Code and date fields are trimmed. `type_description` and `dunning_status`
/// are passed through untouched so fixed-width padding survives.
///
/// # Arguments
///
/// * `record` - The deserialized CSV record
///
/// # Returns
///
/// * `Ok(LedgerLine)` - Successfully converted line
/// * `Err(EngineError::InvalidField)` - A date, amount or paid flag did not parse
pub fn convert_ledger_record(record: LedgerCsvRecord) -> Result<LedgerLine, EngineError> {
    let reference = record.transaction_reference.trim().to_string();

    let transaction_date = parse_date("transaction_date", &record.transaction_date, &reference)?;
    let made_up_date = parse_date("made_up_date", &record.made_up_date, &reference)?;
    let due_date = parse_date("due_date", &record.due_date, &reference)?;
    let amount = parse_amount("amount", &record.amount, &reference)?;
    let outstanding_amount =
        parse_amount("outstanding_amount", &record.outstanding_amount, &reference)?;
    let is_paid = parse_flag("is_paid", &record.is_paid, &reference)?;

    Ok(LedgerLine {
        company_code: record.company_code.trim().to_string(),
        ledger_code: record.ledger_code.trim().to_string(),
        customer_code: record.customer_code.trim().to_string(),
        transaction_reference: reference,
        transaction_date,
        made_up_date,
        due_date,
        amount,
        outstanding_amount,
        is_paid,
        transaction_type: record.transaction_type.trim().to_string(),
        transaction_subtype: record.transaction_subtype.trim().to_string(),
        type_description: record.type_description,
        account_status: record.account_status.trim().to_string(),
        dunning_status: record.dunning_status,
    })
}

fn parse_date(field: &str, value: &str, reference: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(value.trim(), LEDGER_DATE_FORMAT)
        .map_err(|_| EngineError::invalid_field(field, value, reference))
}

fn parse_amount(field: &str, value: &str, reference: &str) -> Result<Decimal, EngineError> {
    Decimal::from_str(value.trim()).map_err(|_| EngineError::invalid_field(field, value, reference))
}

fn parse_flag(field: &str, value: &str, reference: &str) -> Result<bool, EngineError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "y" | "1" => Ok(true),
        "false" | "n" | "0" => Ok(false),
        _ => Err(EngineError::invalid_field(field, value, reference)),
    }
}

/// Write transaction lists in CSV format, one row per item
///
/// Lists are written in the order given. Empty lists produce no rows.
///
/// # Arguments
///
/// * `lists` - Generated lists with their owning account
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(EngineError::Output)` if a write error occurred
pub fn write_transaction_lists_csv(
    lists: &[CustomerTransactionList],
    output: &mut dyn Write,
) -> Result<(), EngineError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(OUTPUT_HEADER)
        .map_err(|e| EngineError::output(format!("Failed to write CSV header: {}", e)))?;

    for customer_list in lists {
        for item in &customer_list.list.items {
            writer
                .write_record(&[
                    customer_list.customer_code.clone(),
                    customer_list.company_code.clone(),
                    customer_list.list.etag.clone(),
                    item.id.clone(),
                    item.etag.clone(),
                    item.kind.clone(),
                    item.is_paid.to_string(),
                    item.is_dca.to_string(),
                    item.due_date.format(LEDGER_DATE_FORMAT).to_string(),
                    item.made_up_date.format(LEDGER_DATE_FORMAT).to_string(),
                    item.transaction_date.format(LEDGER_DATE_FORMAT).to_string(),
                    format!("{:.2}", item.original_amount),
                    format!("{:.2}", item.outstanding),
                    item.category.to_string(),
                    item.reason.clone(),
                    item.payable_status.to_string(),
                ])
                .map_err(|e| EngineError::output(format!("Failed to write item record: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| EngineError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write transaction lists as a pretty-printed JSON array
pub fn write_transaction_lists_json(
    lists: &[CustomerTransactionList],
    output: &mut dyn Write,
) -> Result<(), EngineError> {
    serde_json::to_writer_pretty(&mut *output, lists)?;
    writeln!(output).map_err(|e| EngineError::output(format!("Failed to write output: {}", e)))?;
    output
        .flush()
        .map_err(|e| EngineError::output(format!("Failed to flush output: {}", e)))
}
