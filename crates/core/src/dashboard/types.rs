//! Dashboard view types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::Progress;
use crate::compare::BranchDelta;
use crate::cutoff::CutoffState;
use crate::period::Scope;
use crate::record::SalesRecord;
use tracker_shared::types::RecordId;

/// What the dashboard is asked to show.
#[derive(Debug, Clone, Copy)]
pub struct DashboardQuery {
    /// Optional as-of date; `None` shows the open cycle.
    pub as_of: Option<NaiveDate>,
    /// Day shown in the daily table.
    pub day: NaiveDate,
}

/// Comparison of a branch with the previous cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Comparison {
    /// There is no earlier cutoff to compare with.
    NoPreviousCutoff,
    /// Delta against a cutoff.
    AgainstCutoff {
        /// Cutoff compared with.
        cutoff_date: NaiveDate,
        /// The change.
        #[serde(flatten)]
        delta: BranchDelta,
    },
}

/// One branch card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCard {
    /// Branch name.
    pub branch: String,
    /// Cycle total.
    pub cycle_total: Decimal,
    /// Total for the selected day.
    pub day_total: Decimal,
    /// Progress against the branch target.
    pub progress: Progress,
    /// Comparison with the previous cutoff.
    pub comparison: Comparison,
}

/// Progress band used to color ranking badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    /// Below 80%.
    Low,
    /// From 80% up to but excluding 100%.
    Medium,
    /// 100% or more.
    High,
}

impl ProgressTier {
    /// Classifies an unclamped percentage.
    #[must_use]
    pub fn from_percent(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            Self::High
        } else if percent >= Decimal::from(80) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One row of the staff ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    /// 1-based rank.
    pub position: usize,
    /// Staff member.
    pub staff: String,
    /// Progress against the personal target.
    pub progress: Progress,
    /// Progress band.
    pub tier: ProgressTier,
    /// Non-zero totals per branch.
    pub by_branch: BTreeMap<String, Decimal>,
}

/// One row of the daily table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRow {
    /// 1-based row number.
    pub position: usize,
    /// Record ID.
    pub id: RecordId,
    /// Staff member.
    pub staff: String,
    /// Branch.
    pub branch: String,
    /// Amount.
    pub amount: Decimal,
    /// Note, if any.
    pub note: Option<String>,
}

impl DailyRow {
    pub(crate) fn from_record(position: usize, record: &SalesRecord) -> Self {
        Self {
            position,
            id: record.id.clone(),
            staff: record.staff.clone(),
            branch: record.branch.clone(),
            amount: record.amount,
            note: record.note.clone(),
        }
    }
}

/// Headline totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTotals {
    /// Total over the scope.
    pub cycle_total: Decimal,
    /// Total for the selected day.
    pub day_total: Decimal,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Resolved scope.
    pub scope: Scope,
    /// Selected day.
    pub day: NaiveDate,
    /// Cutoff state.
    pub cutoff: CutoffState,
    /// Last successful save.
    pub updated_at: Option<DateTime<Utc>>,
    /// Branch cards in configured order.
    pub branches: Vec<BranchCard>,
    /// Staff ranking, best first.
    pub ranking: Vec<RankingRow>,
    /// Records of the selected day.
    pub daily: Vec<DailyRow>,
    /// Headline totals.
    pub totals: GlobalTotals,
}

/// Days of a month that have at least one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Days with records, ascending and distinct.
    pub days_with_records: Vec<NaiveDate>,
}
