//! Validation of new records.

use rust_decimal::Decimal;
use tracker_shared::types::RecordId;

use super::error::RecordError;
use super::types::{NewSalesRecord, SalesRecord};

/// Largest amount a single sale may carry.
///
/// Keeps every total over the log far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Validates a new record and assigns it the given id.
///
/// Names are trimmed and blank notes are dropped. The amount is kept exactly
/// as entered.
///
/// # Errors
///
/// Returns the first failing rule, checked in form order: date, branch,
/// staff, amount.
pub fn validate_new_record(
    id: RecordId,
    input: NewSalesRecord,
) -> Result<SalesRecord, RecordError> {
    let date = input.date.ok_or(RecordError::MissingDate)?;

    let branch = input.branch.trim();
    if branch.is_empty() {
        return Err(RecordError::MissingBranch);
    }

    let staff = input.staff.trim();
    if staff.is_empty() {
        return Err(RecordError::MissingStaff);
    }

    if input.amount <= Decimal::ZERO {
        return Err(RecordError::NonPositiveAmount(input.amount));
    }
    if input.amount > MAX_AMOUNT {
        return Err(RecordError::AmountTooLarge {
            amount: input.amount,
            max: MAX_AMOUNT,
        });
    }

    let note = input
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(SalesRecord {
        id,
        date,
        staff: staff.to_string(),
        branch: branch.to_string(),
        amount: input.amount,
        note,
    })
}
