//! Loads and saves the working state through the collaborators.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};
use tracker_core::document::RecordDocument;
use tracker_core::roster::Roster;
use tracker_core::state::WorkingState;

use crate::config_provider::ConfigProvider;
use crate::error::StoreResult;
use crate::record_store::RecordStore;

/// Tracker repository over a record store and a config provider.
#[derive(Clone)]
pub struct TrackerRepository {
    store: Arc<dyn RecordStore>,
    config: Arc<dyn ConfigProvider>,
    bin_id: String,
}

impl TrackerRepository {
    /// Creates a repository for the document in `bin_id`.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: Arc<dyn ConfigProvider>,
        bin_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            config,
            bin_id: bin_id.into(),
        }
    }

    /// Bin holding the tracker document.
    #[must_use]
    pub fn bin_id(&self) -> &str {
        &self.bin_id
    }

    /// The underlying record store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Reads the current roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the config provider cannot be reached.
    pub async fn fetch_roster(&self) -> StoreResult<Roster> {
        self.config.fetch_roster().await.inspect_err(|e| {
            error!(error = %e, "Failed to fetch roster");
        })
    }

    /// Reads and decodes the tracker document.
    ///
    /// A missing document decodes as empty. Malformed entries are logged and
    /// kept aside so the next save writes them back.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store cannot be reached.
    pub async fn load_document(&self) -> StoreResult<RecordDocument> {
        let raw = self.store.load(&self.bin_id).await.inspect_err(|e| {
            error!(error = %e, bin_id = %self.bin_id, "Failed to load document");
        })?;

        let decoded = RecordDocument::from_value(raw);
        if decoded.unparsed_records > 0 || decoded.unparsed_snapshots > 0 {
            warn!(
                bin_id = %self.bin_id,
                unparsed_records = decoded.unparsed_records,
                unparsed_snapshots = decoded.unparsed_snapshots,
                "Stored document has malformed entries, keeping them aside"
            );
        }
        Ok(decoded.document)
    }

    /// Reads the roster and the document together.
    ///
    /// # Errors
    ///
    /// Returns an error if either collaborator cannot be reached.
    pub async fn load_state(&self) -> StoreResult<WorkingState> {
        let (roster, document) = tokio::try_join!(self.fetch_roster(), self.load_document())?;

        info!(
            staff = roster.staff.len(),
            branches = roster.branches.len(),
            records = document.records.len(),
            "Working state loaded"
        );
        Ok(WorkingState::new(roster, document))
    }

    /// Saves the document stamped with the current time and returns the
    /// stamped copy.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the record store cannot be
    /// reached.
    pub async fn save_document(&self, document: &RecordDocument) -> StoreResult<RecordDocument> {
        let stamped = document.touched(Utc::now());
        let value: Value = stamped.to_value()?;

        self.store
            .save(&self.bin_id, &value)
            .await
            .inspect_err(|e| {
                error!(error = %e, bin_id = %self.bin_id, "Failed to save document");
            })?;

        Ok(stamped)
    }

    /// Persists `next` and returns it with its save time applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; `next` is then discarded.
    pub async fn persist(&self, next: WorkingState) -> StoreResult<WorkingState> {
        let document = self.save_document(&next.document).await?;
        Ok(WorkingState::new(next.roster, document))
    }
}
