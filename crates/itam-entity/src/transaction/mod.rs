//! Transaction records: borrows, repair tickets, and issuances. Each one
//! points at an employee on the organization path and an asset on the
//! catalog path.

pub mod borrow;
pub mod issuance;
pub mod repair;

pub use borrow::{BorrowRecord, BorrowUpdate, NewBorrow};
pub use issuance::{IssuanceRecord, IssuanceUpdate, NewIssuance};
pub use repair::{NewRepair, RepairRequest, RepairUpdate};

use chrono::NaiveDate;
use validator::ValidationError;

/// Shared rule: an end date may not precede its start date.
pub(crate) fn ensure_ordered(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(ValidationError::new(code).with_message(message.into()))
        }
        _ => Ok(()),
    }
}
