//! Record store: one JSON document per bin, read and replaced wholesale.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::debug;
use tracker_shared::JsonBinConfig;

use crate::error::{StoreError, StoreResult};
use crate::http::{build_client, endpoint, read_json};

const SERVICE: &str = "jsonbin";
const MASTER_KEY_HEADER: &str = "X-Master-Key";

/// A remote JSON document store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches the latest document in a bin. `None` if the bin has none.
    async fn load(&self, bin_id: &str) -> StoreResult<Option<Value>>;

    /// Replaces the document in a bin, returning the store's reply.
    async fn save(&self, bin_id: &str, document: &Value) -> StoreResult<Value>;
}

/// JSONBin v3 client. The master key never leaves the server.
#[derive(Debug, Clone)]
pub struct JsonBinStore {
    client: Client,
    base_url: String,
    master_key: String,
}

impl JsonBinStore {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &JsonBinConfig) -> StoreResult<Self> {
        Ok(Self {
            client: build_client(SERVICE, config.timeout_secs)?,
            base_url: config.base_url.clone(),
            master_key: config.master_key.clone(),
        })
    }
}

/// Strips the `{ "record": ... }` envelope JSONBin wraps reads in.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("record") => {
            map.remove("record").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl RecordStore for JsonBinStore {
    async fn load(&self, bin_id: &str) -> StoreResult<Option<Value>> {
        let url = endpoint(SERVICE, &self.base_url, &["b", bin_id, "latest"])?;
        debug!(bin_id, "Loading document");

        let response = self
            .client
            .get(url)
            .header(MASTER_KEY_HEADER, &self.master_key)
            .send()
            .await
            .map_err(|source| StoreError::Transport {
                service: SERVICE,
                source,
            })?;

        let body = read_json(SERVICE, response).await?;
        Ok(body.map(unwrap_envelope).filter(|v| !v.is_null()))
    }

    async fn save(&self, bin_id: &str, document: &Value) -> StoreResult<Value> {
        let url = endpoint(SERVICE, &self.base_url, &["b", bin_id])?;
        debug!(bin_id, "Saving document");

        let response = self
            .client
            .put(url)
            .header(MASTER_KEY_HEADER, &self.master_key)
            .json(document)
            .send()
            .await
            .map_err(|source| StoreError::Transport {
                service: SERVICE,
                source,
            })?;

        match read_json(SERVICE, response).await? {
            Some(reply) => Ok(reply),
            None => Err(StoreError::Status {
                service: SERVICE,
                status: 404,
                body: format!("bin {bin_id} does not exist"),
            }),
        }
    }
}

/// In-memory store for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    bins: Mutex<HashMap<String, Value>>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one document.
    #[must_use]
    pub fn with_document(bin_id: &str, document: Value) -> Self {
        Self {
            bins: Mutex::new(HashMap::from([(bin_id.to_string(), document)])),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The document currently held in a bin.
    pub async fn document(&self, bin_id: &str) -> Option<Value> {
        self.bins.lock().await.get(bin_id).cloned()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                service: "memory store",
                status: 503,
                body: "store marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self, bin_id: &str) -> StoreResult<Option<Value>> {
        self.check_available()?;
        Ok(self.bins.lock().await.get(bin_id).cloned())
    }

    async fn save(&self, bin_id: &str, document: &Value) -> StoreResult<Value> {
        self.check_available()?;
        self.bins
            .lock()
            .await
            .insert(bin_id.to_string(), document.clone());
        Ok(json!({ "record": document, "metadata": { "parentId": bin_id } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_is_unwrapped() {
        let body = json!({ "record": { "records": [] }, "metadata": { "id": "b1" } });

        assert_eq!(unwrap_envelope(body), json!({ "records": [] }));
    }

    #[test]
    fn test_bare_document_is_kept() {
        let body = json!({ "records": [] });

        assert_eq!(unwrap_envelope(body.clone()), body);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryRecordStore::new();

        assert_eq!(store.load("b1").await.unwrap(), None);

        store.save("b1", &json!({ "records": [] })).await.unwrap();

        assert_eq!(
            store.load("b1").await.unwrap(),
            Some(json!({ "records": [] }))
        );
    }

    #[tokio::test]
    async fn test_memory_store_can_fail() {
        let store = MemoryRecordStore::with_document("b1", json!({}));
        store.set_unavailable(true);

        assert!(store.load("b1").await.is_err());
        assert!(store.save("b1", &json!({})).await.is_err());
        assert_eq!(store.document("b1").await, Some(json!({})));
    }
}
