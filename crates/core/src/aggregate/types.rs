//! Aggregate result types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::roster::TargetConfig;

/// Progress of a total against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Total achieved.
    pub total: Decimal,
    /// Target, zero when unset.
    pub target: Decimal,
    /// Unclamped percentage; may exceed 100.
    pub percent: Decimal,
    /// Percentage clamped to `[0, 100]` for progress bars.
    pub bar_percent: Decimal,
}

impl Progress {
    /// Computes `total / target * 100`, or 0 when the target is not positive.
    ///
    /// A percentage too large for a `Decimal` saturates at its bound.
    #[must_use]
    pub fn against(total: Decimal, target: Decimal) -> Self {
        let percent = if target > Decimal::ZERO {
            total
                .checked_div(target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if total.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ZERO
        };

        Self {
            total,
            target,
            percent,
            bar_percent: percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        }
    }
}

/// Totals over one record set.
///
/// Maps are ordered so two runs over the same input serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    /// Total per branch.
    pub by_branch: BTreeMap<String, Decimal>,
    /// Total per staff member.
    pub by_staff: BTreeMap<String, Decimal>,
    /// Total per staff member, broken down by branch.
    pub by_staff_and_branch: BTreeMap<String, BTreeMap<String, Decimal>>,
    /// Targets the progress helpers measure against.
    #[serde(skip)]
    pub targets: TargetConfig,
    /// Sum of every amount.
    pub grand_total: Decimal,
    /// Number of records aggregated.
    pub record_count: usize,
}

impl Aggregates {
    /// Total for a branch, zero when it had no records.
    #[must_use]
    pub fn branch_total(&self, branch: &str) -> Decimal {
        self.by_branch.get(branch).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total for a staff member, zero when they had no records.
    #[must_use]
    pub fn staff_total(&self, staff: &str) -> Decimal {
        self.by_staff.get(staff).copied().unwrap_or(Decimal::ZERO)
    }

    /// Progress of a branch against its branch target.
    #[must_use]
    pub fn branch_progress(&self, branch: &str) -> Progress {
        Progress::against(self.branch_total(branch), self.targets.branch_target(branch))
    }

    /// Progress of a staff member against the personal target.
    #[must_use]
    pub fn staff_progress(&self, staff: &str) -> Progress {
        Progress::against(self.staff_total(staff), self.targets.personal_global)
    }
}
