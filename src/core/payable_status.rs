//! Payable status resolution
//!
//! A penalty can only be paid online when it is the sole surviving line on
//! the account. Anything else is routed to manual handling.

use super::traits::{ClassifiedLine, PayableStatusProvider};
use crate::types::{ChargeCategory, PayableStatus};

/// Open iff unpaid, not DCA, a penalty, and alone on the account
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPayableStatusProvider;

impl PayableStatusProvider for DefaultPayableStatusProvider {
    fn payable_status(&self, line: &ClassifiedLine, surviving_lines: usize) -> PayableStatus {
        if !line.is_paid
            && !line.is_dca
            && line.category == ChargeCategory::Penalty
            && surviving_lines == 1
        {
            PayableStatus::Open
        } else {
            PayableStatus::Closed
        }
    }
}
