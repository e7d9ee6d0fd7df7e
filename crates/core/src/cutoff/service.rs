//! Cutoff engine.

use chrono::NaiveDate;

use super::error::CutoffError;
use super::types::{CutoffBookkeeping, CutoffSnapshot};
use crate::aggregate::AggregateCalculator;
use crate::period::PeriodPartitioner;
use crate::record::SalesRecord;
use crate::roster::TargetConfig;

/// Closes cycles and answers questions about closed ones. Performs no I/O.
pub struct CutoffEngine;

impl CutoffEngine {
    /// Closes the open cycle.
    ///
    /// The new boundary is the latest record date in the closed cycle, so a
    /// record added later for an earlier day stays in the closed cycle.
    /// Targets are copied into the snapshot so later target changes never
    /// rewrite history.
    ///
    /// # Errors
    ///
    /// Returns `CutoffError::EmptyPeriod` if the open cycle has no records.
    /// The bookkeeping passed in is left untouched either way.
    pub fn run_cutoff(
        records: &[SalesRecord],
        targets: &TargetConfig,
        bookkeeping: &CutoffBookkeeping,
    ) -> Result<(CutoffBookkeeping, CutoffSnapshot), CutoffError> {
        let partition = PeriodPartitioner::partition(records, bookkeeping.last_cutoff_date, None);

        let Some((period_start, period_end)) = partition.date_range() else {
            return Err(CutoffError::EmptyPeriod {
                last_cutoff_date: bookkeeping.last_cutoff_date,
            });
        };

        let aggregates = AggregateCalculator::aggregate(partition.in_scope, targets);

        let snapshot = CutoffSnapshot {
            cutoff_date: period_end,
            period_start,
            period_end,
            targets_at_cutoff: targets.clone(),
            totals_by_branch: aggregates.by_branch,
            totals_by_staff: aggregates.by_staff,
            record_count: aggregates.record_count,
        };

        let mut updated = bookkeeping.clone();
        updated.history.push(snapshot.clone());
        updated.last_cutoff_date = Some(period_end);

        Ok((updated, snapshot))
    }

    /// Targets in force on `as_of`.
    ///
    /// A date covered by a closed cycle uses the targets captured by the
    /// first cutoff on or after it; anything later uses `current`.
    #[must_use]
    pub fn targets_as_of<'a>(
        bookkeeping: &'a CutoffBookkeeping,
        current: &'a TargetConfig,
        as_of: Option<NaiveDate>,
    ) -> &'a TargetConfig {
        let Some(as_of) = as_of else {
            return current;
        };

        bookkeeping
            .history
            .iter()
            .find(|s| s.cutoff_date >= as_of)
            .map_or(current, |s| &s.targets_at_cutoff)
    }
}
