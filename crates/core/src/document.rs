//! The persisted tracker document.
//!
//! One JSON document holds the whole record log plus cutoff bookkeeping. It
//! is read and replaced wholesale. Decoding never fails: a missing document
//! or field falls back to an empty-but-valid value. Malformed entries are set
//! aside untouched and written back on the next save, so a lenient read never
//! deletes stored data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cutoff::{CutoffBookkeeping, CutoffSnapshot};
use crate::record::{SalesRecord, parse_calendar_date};

/// Version written into every saved document.
pub const SCHEMA_VERSION: u32 = 1;

/// Bookkeeping stored next to the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Last successful save.
    pub updated_at: Option<DateTime<Utc>>,
    /// Cutoff boundary and history.
    #[serde(flatten)]
    pub bookkeeping: CutoffBookkeeping,
}

/// The whole stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDocument {
    /// Schema version.
    pub schema_version: u32,
    /// Bookkeeping.
    pub meta: DocumentMeta,
    /// Record log in insertion order.
    pub records: Vec<SalesRecord>,
    /// Raw record entries that could not be decoded, kept verbatim.
    #[serde(skip)]
    pub unparsed_records: Vec<Value>,
    /// Raw snapshot entries that could not be decoded, kept verbatim.
    #[serde(skip)]
    pub unparsed_snapshots: Vec<Value>,
}

impl Default for RecordDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            meta: DocumentMeta::default(),
            records: Vec::new(),
            unparsed_records: Vec::new(),
            unparsed_snapshots: Vec::new(),
        }
    }
}

/// Result of decoding a stored document.
#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    /// The usable document.
    pub document: RecordDocument,
    /// Record entries that could not be used.
    pub unparsed_records: usize,
    /// Snapshot entries that could not be used.
    pub unparsed_snapshots: usize,
}

impl RecordDocument {
    /// Decodes a stored document, defaulting anything missing or malformed.
    ///
    /// Records must have a calendar date, non-blank staff and branch, and a
    /// non-negative amount. History is re-sorted by cutoff date. When the
    /// boundary is missing but history exists, the latest cutoff date is
    /// used as the boundary.
    #[must_use]
    pub fn from_value(value: Option<Value>) -> DecodedDocument {
        let Some(Value::Object(root)) = value else {
            return DecodedDocument::default();
        };

        let (records, unparsed_records) = decode_list(root.get("records"), |record: &SalesRecord| {
            !record.amount.is_sign_negative()
                && !record.staff.trim().is_empty()
                && !record.branch.trim().is_empty()
        });

        let empty = Map::new();
        let meta = root.get("meta").and_then(Value::as_object).unwrap_or(&empty);

        let updated_at = meta
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|at| at.with_timezone(&Utc));

        let (mut history, unparsed_snapshots) =
            decode_list(meta.get("history"), |s: &CutoffSnapshot| {
                s.period_start <= s.period_end
            });
        history.sort_by_key(|s| s.cutoff_date);

        let last_cutoff_date = meta
            .get("lastCutoffDate")
            .and_then(Value::as_str)
            .and_then(parse_calendar_date)
            .or_else(|| history.last().map(|s| s.cutoff_date));

        DecodedDocument {
            unparsed_records: unparsed_records.len(),
            unparsed_snapshots: unparsed_snapshots.len(),
            document: Self {
                schema_version: SCHEMA_VERSION,
                meta: DocumentMeta {
                    updated_at,
                    bookkeeping: CutoffBookkeeping {
                        last_cutoff_date,
                        history,
                    },
                },
                records,
                unparsed_records,
                unparsed_snapshots,
            },
        }
    }

    /// Encodes the document for storage.
    ///
    /// Entries set aside while decoding are appended after the decoded ones.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;

        if let Some(records) = value.get_mut("records").and_then(Value::as_array_mut) {
            records.extend(self.unparsed_records.iter().cloned());
        }
        if let Some(history) = value
            .get_mut("meta")
            .and_then(|meta| meta.get_mut("history"))
            .and_then(Value::as_array_mut)
        {
            history.extend(self.unparsed_snapshots.iter().cloned());
        }
        Ok(value)
    }

    /// Returns a copy stamped with a new save time.
    #[must_use]
    pub fn touched(&self, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.meta.updated_at = Some(at);
        next
    }
}

fn decode_list<T, F>(value: Option<&Value>, keep: F) -> (Vec<T>, Vec<Value>)
where
    T: serde::de::DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let Some(items) = value.and_then(Value::as_array) else {
        return (Vec::new(), Vec::new());
    };

    let mut kept = Vec::with_capacity(items.len());
    let mut unparsed = Vec::new();
    for item in items {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) if keep(&parsed) => kept.push(parsed),
            _ => unparsed.push(item.clone()),
        }
    }
    (kept, unparsed)
}
