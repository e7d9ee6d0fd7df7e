//! Cutoff error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when closing a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutoffError {
    /// The open cycle has no records.
    #[error("No records to close in the current cycle")]
    EmptyPeriod {
        /// Boundary of the previous cutoff, if any.
        last_cutoff_date: Option<NaiveDate>,
    },
}
