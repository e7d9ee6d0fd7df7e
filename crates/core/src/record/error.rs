//! Record validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a new record is rejected before it reaches the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No date was selected.
    #[error("A date is required")]
    MissingDate,

    /// No staff member was selected.
    #[error("A staff member is required")]
    MissingStaff,

    /// No branch was selected.
    #[error("A branch is required")]
    MissingBranch,

    /// Amount is zero or negative.
    #[error("Amount must be greater than 0, got {0}")]
    NonPositiveAmount(Decimal),

    /// Amount is above the largest accepted sale.
    #[error("Amount must not exceed {max}, got {amount}")]
    AmountTooLarge {
        /// Amount entered.
        amount: Decimal,
        /// Largest accepted amount.
        max: Decimal,
    },
}
