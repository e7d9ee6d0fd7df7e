//! Period-over-period comparison per branch.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Change of one branch's total against the previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDelta {
    /// Current cycle total.
    pub current: Decimal,
    /// Previous cycle total, zero when absent.
    pub previous: Decimal,
    /// `current - previous`.
    pub delta: Decimal,
    /// Percentage change; `None` when both totals are zero.
    pub delta_pct: Option<Decimal>,
}

/// Compares current cycle totals with the previous cycle's.
pub struct HistoricalComparator;

impl HistoricalComparator {
    /// Percentage reported when a branch goes from nothing to something.
    pub const NEW_ACTIVITY_PCT: Decimal = Decimal::ONE_HUNDRED;

    /// Computes deltas over the union of branches in both maps.
    ///
    /// A branch missing from one side counts as zero there. From zero to a
    /// positive total is reported as a 100% increase; zero to zero has no
    /// percentage.
    #[must_use]
    pub fn compare(
        current: &BTreeMap<String, Decimal>,
        previous: &BTreeMap<String, Decimal>,
    ) -> BTreeMap<String, BranchDelta> {
        current
            .keys()
            .chain(previous.keys())
            .map(|branch| {
                let now = current.get(branch).copied().unwrap_or(Decimal::ZERO);
                let before = previous.get(branch).copied().unwrap_or(Decimal::ZERO);
                (branch.clone(), Self::delta(now, before))
            })
            .collect()
    }

    /// Computes the delta for a single pair of totals.
    #[must_use]
    pub fn delta(current: Decimal, previous: Decimal) -> BranchDelta {
        let delta = current.saturating_sub(previous);
        let delta_pct = if previous.is_zero() {
            (!current.is_zero()).then_some(Self::NEW_ACTIVITY_PCT)
        } else {
            let pct = delta
                .checked_div(previous)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
            Some(pct.unwrap_or(
                if delta.is_sign_negative() == previous.is_sign_negative() {
                    Decimal::MAX
                } else {
                    Decimal::MIN
                },
            ))
        };

        BranchDelta {
            current,
            previous,
            delta,
            delta_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn totals(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    /// Scenario D: from zero to 200 is a defined 100% increase.
    #[test]
    fn test_zero_previous_positive_current_is_full_increase() {
        let result = HistoricalComparator::delta(dec!(200), Decimal::ZERO);

        assert_eq!(result.delta, dec!(200));
        assert_eq!(result.delta_pct, Some(dec!(100)));
    }

    #[test]
    fn test_zero_to_zero_has_no_percentage() {
        let result = HistoricalComparator::delta(Decimal::ZERO, Decimal::ZERO);

        assert_eq!(result.delta, Decimal::ZERO);
        assert_eq!(result.delta_pct, None);
    }

    #[test]
    fn test_regular_change() {
        let up = HistoricalComparator::delta(dec!(150), dec!(100));
        let down = HistoricalComparator::delta(dec!(75), dec!(100));

        assert_eq!(up.delta_pct, Some(dec!(50)));
        assert_eq!(down.delta, dec!(-25));
        assert_eq!(down.delta_pct, Some(dec!(-25)));
    }

    #[test]
    fn test_overflowing_percentage_saturates() {
        let result = HistoricalComparator::delta(Decimal::MAX, dec!(0.01));

        assert_eq!(result.delta_pct, Some(Decimal::MAX));
    }

    #[test]
    fn test_compare_covers_union_of_branches() {
        let current = totals(&[("Centro", dec!(200)), ("Norte", dec!(0))]);
        let previous = totals(&[("Centro", dec!(100)), ("Sexta Calle", dec!(80))]);

        let result = HistoricalComparator::compare(&current, &previous);

        assert_eq!(result.len(), 3);
        assert_eq!(result["Centro"].delta_pct, Some(dec!(100)));
        assert_eq!(result["Norte"].delta_pct, None);
        assert_eq!(result["Sexta Calle"].delta, dec!(-80));
        assert_eq!(result["Sexta Calle"].delta_pct, Some(dec!(-100)));
    }

    #[test]
    fn test_compare_against_empty_previous() {
        let current = totals(&[("Centro", dec!(10))]);

        let result = HistoricalComparator::compare(&current, &BTreeMap::new());

        assert_eq!(result["Centro"].previous, Decimal::ZERO);
        assert_eq!(result["Centro"].delta_pct, Some(dec!(100)));
    }
}
