//! Tests for the aggregate calculator.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::AggregateCalculator;
use super::types::Progress;
use crate::period::PeriodPartitioner;
use crate::roster::TargetConfig;
use crate::test_support::{day, record};

fn targets(branch: &str, target: Decimal, personal: Decimal) -> TargetConfig {
    TargetConfig {
        per_branch: BTreeMap::from([(branch.to_string(), target)]),
        personal_global: personal,
    }
}

/// Scenario A: one record, no cutoff, Centro target 1000.
#[test]
fn test_single_record_progress() {
    let records = vec![record("r1", day(2024, 6, 5), "Ana", "Centro", dec!(100))];
    let targets = targets("Centro", dec!(1000), dec!(0));

    let partition = PeriodPartitioner::partition(&records, None, None);
    let aggregates = AggregateCalculator::aggregate(partition.in_scope, &targets);

    assert_eq!(aggregates.branch_total("Centro"), dec!(100));
    assert_eq!(aggregates.branch_progress("Centro").percent, dec!(10));
    assert_eq!(aggregates.grand_total, dec!(100));
    assert_eq!(aggregates.record_count, 1);
}

/// Scenario E: a zero target yields 0%, never a division error.
#[test]
fn test_zero_target_progress_is_zero() {
    let progress = Progress::against(dec!(250), Decimal::ZERO);

    assert_eq!(progress.percent, Decimal::ZERO);
    assert_eq!(progress.bar_percent, Decimal::ZERO);
}

#[test]
fn test_missing_branch_target_progress_is_zero() {
    let records = vec![record("r1", day(2024, 6, 5), "Ana", "Norte", dec!(80))];
    let aggregates = AggregateCalculator::aggregate(&records, &TargetConfig::default());

    assert_eq!(aggregates.branch_progress("Norte").percent, Decimal::ZERO);
    assert_eq!(aggregates.staff_progress("Ana").percent, Decimal::ZERO);
}

#[test]
fn test_progress_over_target_is_kept_unclamped() {
    let progress = Progress::against(dec!(1423), dec!(1000));

    assert_eq!(progress.percent, dec!(142.3));
    assert_eq!(progress.bar_percent, dec!(100));
}

#[test]
fn test_summation_is_exact() {
    let records = vec![
        record("r1", day(2024, 6, 5), "Ana", "Centro", dec!(0.1)),
        record("r2", day(2024, 6, 5), "Ana", "Centro", dec!(0.2)),
        record("r3", day(2024, 6, 6), "Ana", "Centro", dec!(10.005)),
    ];

    let aggregates = AggregateCalculator::aggregate(&records, &TargetConfig::default());

    assert_eq!(aggregates.branch_total("Centro"), dec!(10.305));
}

#[test]
fn test_staff_breakdown_by_branch() {
    let records = vec![
        record("r1", day(2024, 6, 5), "Ana", "Centro", dec!(100)),
        record("r2", day(2024, 6, 5), "Ana", "Norte", dec!(40)),
        record("r3", day(2024, 6, 6), "Luis", "Centro", dec!(60)),
        record("r4", day(2024, 6, 7), "Ana", "Centro", dec!(25)),
    ];
    let targets = targets("Centro", dec!(1000), dec!(500));

    let aggregates = AggregateCalculator::aggregate(&records, &targets);

    assert_eq!(aggregates.staff_total("Ana"), dec!(165));
    assert_eq!(aggregates.by_staff_and_branch["Ana"]["Centro"], dec!(125));
    assert_eq!(aggregates.by_staff_and_branch["Ana"]["Norte"], dec!(40));
    assert_eq!(aggregates.by_staff_and_branch["Luis"].len(), 1);
    assert_eq!(aggregates.staff_progress("Ana").percent, dec!(33));
    assert_eq!(aggregates.branch_total("Centro"), dec!(185));
}

#[test]
fn test_overflowing_sums_saturate() {
    let records = vec![
        record("r1", day(2024, 6, 5), "Ana", "Centro", Decimal::MAX),
        record("r2", day(2024, 6, 6), "Ana", "Centro", dec!(1)),
    ];

    let aggregates = AggregateCalculator::aggregate(&records, &TargetConfig::default());

    assert_eq!(aggregates.grand_total, Decimal::MAX);
    assert_eq!(aggregates.branch_total("Centro"), Decimal::MAX);
    assert_eq!(aggregates.by_staff_and_branch["Ana"]["Centro"], Decimal::MAX);
    assert_eq!(
        AggregateCalculator::sum([Decimal::MAX, Decimal::MAX]),
        Decimal::MAX
    );
}

#[test]
fn test_overflowing_progress_saturates() {
    let progress = Progress::against(Decimal::MAX, dec!(0.5));

    assert_eq!(progress.percent, Decimal::MAX);
    assert_eq!(progress.bar_percent, dec!(100));
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("Ana"), Just("Luis"), Just("Marta")].prop_map(str::to_string)
}

fn branch_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("Centro"), Just("Norte"), Just("Sexta Calle")].prop_map(str::to_string)
}

proptest! {
    /// Branch totals and staff totals are two views of the same records.
    #[test]
    fn test_branch_and_staff_totals_agree(
        rows in prop::collection::vec((name_strategy(), branch_strategy(), amount_strategy()), 0..50),
    ) {
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (staff, branch, amount))| record(&format!("r{i}"), day(2024, 6, 1), staff, branch, *amount))
            .collect();

        let aggregates = AggregateCalculator::aggregate(&records, &TargetConfig::default());

        let by_branch: Decimal = aggregates.by_branch.values().copied().sum();
        let by_staff: Decimal = aggregates.by_staff.values().copied().sum();
        let nested: Decimal = aggregates
            .by_staff_and_branch
            .values()
            .flat_map(|m| m.values().copied())
            .sum();
        prop_assert_eq!(by_branch, by_staff);
        prop_assert_eq!(by_branch, nested);
        prop_assert_eq!(by_branch, aggregates.grand_total);
    }

    /// Aggregation is pure: same input, identical output, input untouched.
    #[test]
    fn test_aggregate_is_idempotent(
        rows in prop::collection::vec((name_strategy(), branch_strategy(), amount_strategy()), 0..30),
        target in amount_strategy(),
    ) {
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (staff, branch, amount))| record(&format!("r{i}"), day(2024, 6, 1), staff, branch, *amount))
            .collect();
        let snapshot = records.clone();
        let targets = targets("Centro", target, target);

        let first = AggregateCalculator::aggregate(&records, &targets);
        let second = AggregateCalculator::aggregate(&records, &targets);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(records, snapshot);
    }

    /// The bar value always stays within [0, 100].
    #[test]
    fn test_bar_percent_is_clamped(total in amount_strategy(), target in amount_strategy()) {
        let progress = Progress::against(total, target);

        prop_assert!(progress.bar_percent >= Decimal::ZERO);
        prop_assert!(progress.bar_percent <= Decimal::ONE_HUNDRED);
        prop_assert!(progress.percent >= progress.bar_percent || target.is_zero());
    }
}
