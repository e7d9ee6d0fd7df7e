//! Working state: the roster merged with the stored document.
//!
//! Every mutation returns a new state and leaves the receiver untouched, so
//! a caller can persist the new state first and swap it in only on success.

use chrono::NaiveDate;
use thiserror::Error;
use tracker_shared::AppError;
use tracker_shared::types::RecordId;

use crate::cutoff::{CutoffBookkeeping, CutoffEngine, CutoffError, CutoffSnapshot};
use crate::document::RecordDocument;
use crate::period::{Partition, PeriodPartitioner};
use crate::record::{NewSalesRecord, RecordError, SalesRecord, validate_new_record};
use crate::roster::{Roster, TargetConfig};

/// Errors from state mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Record failed validation.
    #[error(transparent)]
    InvalidInput(#[from] RecordError),

    /// No record with this id exists.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Cutoff could not be run.
    #[error(transparent)]
    Cutoff(#[from] CutoffError),
}

impl From<StateError> for AppError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidInput(e) => Self::Validation(e.to_string()),
            StateError::RecordNotFound(id) => Self::NotFound(format!("record {id}")),
            StateError::Cutoff(e) => Self::EmptyPeriod(e.to_string()),
        }
    }
}

/// Roster plus stored document: everything the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingState {
    /// Staff, branches and current targets.
    pub roster: Roster,
    /// Records and bookkeeping.
    pub document: RecordDocument,
}

impl WorkingState {
    /// Merges a roster and a document.
    #[must_use]
    pub fn new(roster: Roster, document: RecordDocument) -> Self {
        Self { roster, document }
    }

    /// The record log.
    #[must_use]
    pub fn records(&self) -> &[SalesRecord] {
        &self.document.records
    }

    /// Cutoff bookkeeping.
    #[must_use]
    pub fn bookkeeping(&self) -> &CutoffBookkeeping {
        &self.document.meta.bookkeeping
    }

    /// Current targets.
    #[must_use]
    pub fn targets(&self) -> &TargetConfig {
        &self.roster.targets
    }

    /// Targets in force on `as_of`.
    #[must_use]
    pub fn targets_as_of(&self, as_of: Option<NaiveDate>) -> &TargetConfig {
        CutoffEngine::targets_as_of(self.bookkeeping(), self.targets(), as_of)
    }

    /// Records in scope for `as_of`.
    #[must_use]
    pub fn partition(&self, as_of: Option<NaiveDate>) -> Partition<'_> {
        PeriodPartitioner::partition(self.records(), self.bookkeeping().last_cutoff_date, as_of)
    }

    /// Returns a state with a new validated record appended.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidInput` if validation fails.
    pub fn with_record(
        &self,
        id: RecordId,
        input: NewSalesRecord,
    ) -> Result<(Self, SalesRecord), StateError> {
        let record = validate_new_record(id, input)?;
        let mut next = self.clone();
        next.document.records.push(record.clone());
        Ok((next, record))
    }

    /// Returns a state without the given record.
    ///
    /// # Errors
    ///
    /// Returns `StateError::RecordNotFound` if no record has this id.
    pub fn without_record(&self, id: &RecordId) -> Result<(Self, SalesRecord), StateError> {
        let position = self
            .records()
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StateError::RecordNotFound(id.clone()))?;

        let mut next = self.clone();
        let removed = next.document.records.remove(position);
        Ok((next, removed))
    }

    /// Returns a state with the open cycle closed.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Cutoff` if the open cycle is empty.
    pub fn with_cutoff(&self) -> Result<(Self, CutoffSnapshot), StateError> {
        let (bookkeeping, snapshot) =
            CutoffEngine::run_cutoff(self.records(), self.targets(), self.bookkeeping())?;

        let mut next = self.clone();
        next.document.meta.bookkeeping = bookkeeping;
        Ok((next, snapshot))
    }

    /// Returns a state with a refreshed roster and the same document.
    #[must_use]
    pub fn with_roster(&self, roster: Roster) -> Self {
        Self {
            roster,
            document: self.document.clone(),
        }
    }
}
