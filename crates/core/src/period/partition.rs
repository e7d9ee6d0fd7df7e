//! Classification of records into the queried scope.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateCalculator;
use crate::record::SalesRecord;

/// Which kind of window a query resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// No cutoff has happened yet; the cycle is everything so far.
    AllTime,
    /// The open cycle after the last cutoff.
    OpenCycle,
    /// A moment on or before the last cutoff, reconstructed as it stood.
    Historical,
}

/// Date bounds of the records a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    /// Exclusive lower bound.
    pub after: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub up_to: Option<NaiveDate>,
    /// Kind of window.
    pub kind: ScopeKind,
}

impl Scope {
    /// Resolves the scope for a query.
    ///
    /// | last cutoff | as-of            | scope                          |
    /// |-------------|------------------|--------------------------------|
    /// | none        | none             | every record                   |
    /// | none        | `d`              | `date <= d`                    |
    /// | `c`         | none             | `date > c`                     |
    /// | `c`         | `d <= c`         | `date <= d` (historical)       |
    /// | `c`         | `d > c`          | `c < date <= d`                |
    ///
    /// An as-of equal to the cutoff is historical: the boundary day belongs
    /// to the closed cycle.
    #[must_use]
    pub fn resolve(last_cutoff: Option<NaiveDate>, as_of: Option<NaiveDate>) -> Self {
        match (last_cutoff, as_of) {
            (None, up_to) => Self {
                after: None,
                up_to,
                kind: ScopeKind::AllTime,
            },
            (Some(cutoff), None) => Self {
                after: Some(cutoff),
                up_to: None,
                kind: ScopeKind::OpenCycle,
            },
            (Some(cutoff), Some(as_of)) if as_of <= cutoff => Self {
                after: None,
                up_to: Some(as_of),
                kind: ScopeKind::Historical,
            },
            (Some(cutoff), Some(as_of)) => Self {
                after: Some(cutoff),
                up_to: Some(as_of),
                kind: ScopeKind::OpenCycle,
            },
        }
    }

    /// Returns true if a record dated `date` falls inside this scope.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.after.is_none_or(|after| date > after) && self.up_to.is_none_or(|up_to| date <= up_to)
    }
}

/// Records split by a scope. Borrowed from the log, never copied.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    /// The resolved scope.
    pub scope: Scope,
    /// Records inside the scope, in log order.
    pub in_scope: Vec<&'a SalesRecord>,
    /// Records outside the scope, in log order.
    pub out_of_scope: Vec<&'a SalesRecord>,
}

impl Partition<'_> {
    /// Sum of in-scope amounts.
    #[must_use]
    pub fn in_scope_total(&self) -> Decimal {
        AggregateCalculator::sum(self.in_scope.iter().map(|r| r.amount))
    }

    /// Earliest and latest in-scope dates, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.in_scope.iter().map(|r| r.date).min()?;
        let end = self.in_scope.iter().map(|r| r.date).max()?;
        Some((start, end))
    }
}

/// Splits the record log relative to the last cutoff and an as-of date.
pub struct PeriodPartitioner;

impl PeriodPartitioner {
    /// Partitions `records` into in-scope and out-of-scope sets.
    ///
    /// Total: every record lands in exactly one of the two sets.
    #[must_use]
    pub fn partition(
        records: &[SalesRecord],
        last_cutoff: Option<NaiveDate>,
        as_of: Option<NaiveDate>,
    ) -> Partition<'_> {
        let scope = Scope::resolve(last_cutoff, as_of);
        let (in_scope, out_of_scope): (Vec<_>, Vec<_>) =
            records.iter().partition(|r| scope.contains(r.date));

        Partition {
            scope,
            in_scope,
            out_of_scope,
        }
    }
}
