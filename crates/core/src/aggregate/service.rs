//! Aggregate calculation.

use rust_decimal::Decimal;

use super::types::Aggregates;
use crate::record::SalesRecord;
use crate::roster::TargetConfig;

/// Reduces record sets into totals.
pub struct AggregateCalculator;

impl AggregateCalculator {
    /// Sums `records` per branch, per staff member and per staff/branch pair.
    /// The result measures progress against `targets`.
    ///
    /// Amounts are added exactly; nothing is rounded here. Sums saturate at
    /// the `Decimal` bounds.
    #[must_use]
    pub fn aggregate<'a, I>(records: I, targets: &TargetConfig) -> Aggregates
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut aggregates = Aggregates {
            targets: targets.clone(),
            ..Aggregates::default()
        };

        for record in records {
            let amount = record.amount;
            add_into(
                aggregates
                    .by_branch
                    .entry(record.branch.clone())
                    .or_insert(Decimal::ZERO),
                amount,
            );
            add_into(
                aggregates
                    .by_staff
                    .entry(record.staff.clone())
                    .or_insert(Decimal::ZERO),
                amount,
            );
            add_into(
                aggregates
                    .by_staff_and_branch
                    .entry(record.staff.clone())
                    .or_default()
                    .entry(record.branch.clone())
                    .or_insert(Decimal::ZERO),
                amount,
            );
            add_into(&mut aggregates.grand_total, amount);
            aggregates.record_count += 1;
        }

        aggregates
    }

    /// Sums amounts exactly, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn sum<I>(amounts: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        amounts
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

fn add_into(total: &mut Decimal, amount: Decimal) {
    *total = total.saturating_add(amount);
}
