//! Cutoff bookkeeping types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::roster::TargetConfig;

/// Summary of one closed cycle. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffSnapshot {
    /// Boundary date of the cutoff; equals `period_end`.
    pub cutoff_date: NaiveDate,
    /// Earliest record date in the closed cycle.
    pub period_start: NaiveDate,
    /// Latest record date in the closed cycle.
    pub period_end: NaiveDate,
    /// Targets in force when the cycle was closed.
    #[serde(default)]
    pub targets_at_cutoff: TargetConfig,
    /// Cycle total per branch.
    #[serde(default)]
    pub totals_by_branch: BTreeMap<String, Decimal>,
    /// Cycle total per staff member.
    #[serde(default)]
    pub totals_by_staff: BTreeMap<String, Decimal>,
    /// Number of records closed.
    #[serde(default)]
    pub record_count: usize,
}

/// Cutoff state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CutoffState {
    /// No cycle has ever been closed.
    NoCutoffYet,
    /// At least one cycle has been closed.
    CutoffActive {
        /// Boundary of the latest cutoff.
        last_cutoff_date: NaiveDate,
    },
}

/// Where the open cycle starts, plus every prior cutoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffBookkeeping {
    /// Records dated after this belong to the open cycle.
    #[serde(default)]
    pub last_cutoff_date: Option<NaiveDate>,
    /// Prior cutoffs, ascending by `cutoff_date`.
    #[serde(default)]
    pub history: Vec<CutoffSnapshot>,
}

impl CutoffBookkeeping {
    /// Current state of the cutoff state machine.
    #[must_use]
    pub fn state(&self) -> CutoffState {
        match self.last_cutoff_date {
            Some(last_cutoff_date) => CutoffState::CutoffActive { last_cutoff_date },
            None => CutoffState::NoCutoffYet,
        }
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&CutoffSnapshot> {
        self.history.last()
    }

    /// The snapshot a view as of `as_of` compares against: the latest one
    /// closed strictly before that date, or the latest overall without a date.
    #[must_use]
    pub fn previous_for(&self, as_of: Option<NaiveDate>) -> Option<&CutoffSnapshot> {
        match as_of {
            None => self.latest(),
            Some(as_of) => self.history.iter().rev().find(|s| s.cutoff_date < as_of),
        }
    }
}
