//! Config provider: staff, branches and targets from a spreadsheet.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use tracker_core::roster::{Roster, TargetConfig};
use tracker_shared::SheetsConfig;

use crate::error::{StoreError, StoreResult};
use crate::http::{build_client, endpoint, read_json};

const SERVICE: &str = "sheets";

/// Supplies the current roster.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Reads staff, branches and targets.
    async fn fetch_roster(&self) -> StoreResult<Roster>;
}

/// Google Sheets v4 values client.
#[derive(Debug, Clone)]
pub struct SheetsConfigProvider {
    client: Client,
    base_url: String,
    api_key: String,
    sheet_id: String,
    range: String,
}

impl SheetsConfigProvider {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &SheetsConfig) -> StoreResult<Self> {
        Ok(Self {
            client: build_client(SERVICE, config.timeout_secs)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            sheet_id: config.sheet_id.clone(),
            range: config.range.clone(),
        })
    }
}

#[async_trait]
impl ConfigProvider for SheetsConfigProvider {
    async fn fetch_roster(&self) -> StoreResult<Roster> {
        let mut url = endpoint(
            SERVICE,
            &self.base_url,
            &["spreadsheets", &self.sheet_id, "values", &self.range],
        )?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        debug!(sheet_id = %self.sheet_id, range = %self.range, "Fetching roster");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| StoreError::Transport {
                service: SERVICE,
                source,
            })?;

        let body = read_json(SERVICE, response)
            .await?
            .ok_or_else(|| StoreError::Status {
                service: SERVICE,
                status: 404,
                body: format!("sheet {} not found", self.sheet_id),
            })?;

        let rows: Vec<Vec<Value>> = body
            .get("values")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| row.as_array().cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        Ok(parse_sheet_values(&rows))
    }
}

/// Builds a roster from raw sheet rows.
///
/// Row 1 is a header. From row 2: column A lists staff, column B lists
/// branches, column C is the target of the branch in the same row, and
/// column D holds the personal target (the last valid value wins). Names are
/// de-duplicated keeping their first position. Targets accept `,` as the
/// decimal separator; anything that is not a positive number is ignored.
#[must_use]
pub fn parse_sheet_values(rows: &[Vec<Value>]) -> Roster {
    let mut roster = Roster::default();
    let mut targets = TargetConfig::default();

    for row in rows.iter().skip(1) {
        let cell = |i: usize| row.get(i).map(cell_text).unwrap_or_default();

        let staff = cell(0);
        if !staff.is_empty() && !roster.staff.contains(&staff) {
            roster.staff.push(staff);
        }

        let branch = cell(1);
        if !branch.is_empty() {
            if let Some(target) = parse_target(&cell(2)) {
                targets.per_branch.insert(branch.clone(), target);
            }
            if !roster.branches.contains(&branch) {
                roster.branches.push(branch);
            }
        }

        if let Some(personal) = parse_target(&cell(3)) {
            targets.personal_global = personal;
        }
    }

    roster.targets = targets;
    roster
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn parse_target(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw.replacen(',', ".", 1))
        .ok()
        .filter(|target| *target > Decimal::ZERO)
}

/// Fixed roster for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    roster: RwLock<Roster>,
    unavailable: AtomicBool,
}

impl MemoryConfigProvider {
    /// Creates a provider serving `roster`.
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: RwLock::new(roster),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Replaces the roster served from now on.
    pub async fn set_roster(&self, roster: Roster) {
        *self.roster.write().await = roster;
    }

    /// Makes every subsequent call fail as if the sheet were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConfigProvider for MemoryConfigProvider {
    async fn fetch_roster(&self) -> StoreResult<Roster> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                service: "memory config",
                status: 503,
                body: "config marked unavailable".to_string(),
            });
        }
        Ok(self.roster.read().await.clone())
    }
}
