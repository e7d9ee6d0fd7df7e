//! Dashboard view construction.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::types::{
    BranchCard, CalendarMonth, Comparison, DailyRow, DashboardQuery, DashboardView, GlobalTotals,
    ProgressTier, RankingRow,
};
use crate::aggregate::{AggregateCalculator, Aggregates};
use crate::compare::HistoricalComparator;
use crate::record::SalesRecord;
use crate::state::WorkingState;

/// Builds dashboard views. Pure; recomputed on every request.
pub struct DashboardService;

impl DashboardService {
    /// Builds the full dashboard for a query.
    #[must_use]
    pub fn build(state: &WorkingState, query: DashboardQuery) -> DashboardView {
        let partition = state.partition(query.as_of);
        let targets = state.targets_as_of(query.as_of);
        let cycle = AggregateCalculator::aggregate(partition.in_scope.iter().copied(), targets);

        let day_records: Vec<&SalesRecord> = state
            .records()
            .iter()
            .filter(|r| r.date == query.day)
            .collect();
        let day = AggregateCalculator::aggregate(day_records.iter().copied(), targets);

        DashboardView {
            scope: partition.scope,
            day: query.day,
            cutoff: state.bookkeeping().state(),
            updated_at: state.document.meta.updated_at,
            branches: Self::branch_cards(state, query, &cycle, &day),
            ranking: Self::ranking(&state.roster.staff, &cycle),
            daily: day_records
                .iter()
                .enumerate()
                .map(|(i, r)| DailyRow::from_record(i + 1, r))
                .collect(),
            totals: GlobalTotals {
                cycle_total: cycle.grand_total,
                day_total: day.grand_total,
            },
        }
    }

    /// Branch cards: configured branches first, then any branch that only
    /// appears in the records.
    fn branch_cards(
        state: &WorkingState,
        query: DashboardQuery,
        cycle: &Aggregates,
        day: &Aggregates,
    ) -> Vec<BranchCard> {
        let previous = state.bookkeeping().previous_for(query.as_of);
        let deltas = previous.map(|snapshot| {
            (
                snapshot.cutoff_date,
                HistoricalComparator::compare(&cycle.by_branch, &snapshot.totals_by_branch),
            )
        });

        Self::ordered_names(&state.roster.branches, cycle.by_branch.keys())
            .into_iter()
            .map(|branch| {
                let cycle_total = cycle.branch_total(&branch);
                let comparison = match &deltas {
                    Some((cutoff_date, deltas)) => Comparison::AgainstCutoff {
                        cutoff_date: *cutoff_date,
                        delta: deltas.get(&branch).copied().unwrap_or_else(|| {
                            HistoricalComparator::delta(cycle_total, Decimal::ZERO)
                        }),
                    },
                    None => Comparison::NoPreviousCutoff,
                };

                BranchCard {
                    cycle_total,
                    day_total: day.branch_total(&branch),
                    progress: cycle.branch_progress(&branch),
                    comparison,
                    branch,
                }
            })
            .collect()
    }

    /// Staff ranking by unclamped progress, then total, then name.
    fn ranking(staff: &[String], cycle: &Aggregates) -> Vec<RankingRow> {
        let mut rows: Vec<RankingRow> = Self::ordered_names(staff, cycle.by_staff.keys())
            .into_iter()
            .map(|name| {
                let progress = cycle.staff_progress(&name);
                let by_branch: BTreeMap<String, Decimal> = cycle
                    .by_staff_and_branch
                    .get(&name)
                    .map(|m| {
                        m.iter()
                            .filter(|(_, total)| **total > Decimal::ZERO)
                            .map(|(b, total)| (b.clone(), *total))
                            .collect()
                    })
                    .unwrap_or_default();

                RankingRow {
                    position: 0,
                    tier: ProgressTier::from_percent(progress.percent),
                    staff: name,
                    progress,
                    by_branch,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.progress
                .percent
                .cmp(&a.progress.percent)
                .then_with(|| b.progress.total.cmp(&a.progress.total))
                .then_with(|| a.staff.cmp(&b.staff))
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.position = i + 1;
        }
        rows
    }

    /// Configured names in order, followed by unconfigured extras sorted.
    fn ordered_names<'a>(
        configured: &[String],
        seen: impl Iterator<Item = &'a String>,
    ) -> Vec<String> {
        let mut names = configured.to_vec();
        for name in seen {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Days in a month that have records. `None` for an invalid month.
    #[must_use]
    pub fn calendar(records: &[SalesRecord], year: i32, month: u32) -> Option<CalendarMonth> {
        NaiveDate::from_ymd_opt(year, month, 1)?;

        let mut days: Vec<NaiveDate> = records
            .iter()
            .map(|r| r.date)
            .filter(|d| d.year() == year && d.month() == month)
            .collect();
        days.sort_unstable();
        days.dedup();

        Some(CalendarMonth {
            year,
            month,
            days_with_records: days,
        })
    }
}
