//! Per-staff statement of the records in a cycle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracker_shared::AppError;

use crate::aggregate::{AggregateCalculator, Progress};
use crate::state::WorkingState;

/// Errors from statement building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The staff member has no records in scope.
    #[error("No records for {staff} in the selected period")]
    NoRecords {
        /// Staff member asked for.
        staff: String,
    },
}

impl From<StatementError> for AppError {
    fn from(err: StatementError) -> Self {
        Self::EmptyPeriod(err.to_string())
    }
}

/// One numbered line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    /// 1-based line number.
    pub position: usize,
    /// Day of the sale.
    pub date: NaiveDate,
    /// Branch.
    pub branch: String,
    /// Amount.
    pub amount: Decimal,
}

/// A staff member's sales over a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStatement {
    /// Staff member.
    pub staff: String,
    /// Earliest line date.
    pub period_start: NaiveDate,
    /// Latest line date.
    pub period_end: NaiveDate,
    /// Lines ordered by date.
    pub lines: Vec<StatementLine>,
    /// Sum of the lines against the personal target.
    pub progress: Progress,
}

/// Builds staff statements.
pub struct StatementService;

impl StatementService {
    /// Builds the statement for `staff` over the scope of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::NoRecords` if the staff member has no records
    /// in scope.
    pub fn build(
        state: &WorkingState,
        staff: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<StaffStatement, StatementError> {
        let staff = staff.trim();
        let partition = state.partition(as_of);

        let mut records: Vec<_> = partition
            .in_scope
            .into_iter()
            .filter(|r| r.staff == staff)
            .collect();
        records.sort_by_key(|r| r.date);

        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(StatementError::NoRecords {
                staff: staff.to_string(),
            });
        };
        let (period_start, period_end) = (first.date, last.date);

        let total = AggregateCalculator::sum(records.iter().map(|r| r.amount));
        let target = state.targets_as_of(as_of).personal_global;

        Ok(StaffStatement {
            staff: staff.to_string(),
            period_start,
            period_end,
            lines: records
                .iter()
                .enumerate()
                .map(|(i, r)| StatementLine {
                    position: i + 1,
                    date: r.date,
                    branch: r.branch.clone(),
                    amount: r.amount,
                })
                .collect(),
            progress: Progress::against(total, target),
        })
    }
}
