//! Grouping of ledger lines into account snapshots
//!
//! A ledger export interleaves lines of many customers. Lines are grouped by
//! (customer code, company code); snapshots come out in the order their first
//! line was seen and keep their lines in file order.

use crate::types::{CustomerAccountSnapshot, LedgerLine};
use std::collections::HashMap;

type SnapshotKey = (String, String);

/// Incremental grouper, fed line by line or batch by batch
#[derive(Debug, Default)]
pub struct SnapshotGrouper {
    index: HashMap<SnapshotKey, usize>,
    groups: Vec<(SnapshotKey, Vec<LedgerLine>)>,
}

impl SnapshotGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: LedgerLine) {
        let key = (line.customer_code.clone(), line.company_code.clone());
        match self.index.get(&key) {
            Some(&position) => self.groups[position].1.push(line),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![line]));
            }
        }
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = LedgerLine>) {
        for line in lines {
            self.push(line);
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume the grouper, stamping every snapshot with the current time
    pub fn finish(self) -> Vec<CustomerAccountSnapshot> {
        self.groups
            .into_iter()
            .map(|((customer_code, company_code), lines)| {
                CustomerAccountSnapshot::new(customer_code, company_code, lines)
            })
            .collect()
    }
}

/// Group a sequence of lines in one go
pub fn group_into_snapshots(
    lines: impl IntoIterator<Item = LedgerLine>,
) -> Vec<CustomerAccountSnapshot> {
    let mut grouper = SnapshotGrouper::new();
    grouper.extend(lines);
    grouper.finish()
}
