//! Router test helpers backed by the in-memory collaborators.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;
use tracker_core::roster::{Roster, TargetConfig};
use tracker_store::{MemoryConfigProvider, MemoryRecordStore, TrackerRepository};

use crate::{AppState, create_router};

pub const BIN_ID: &str = "bin-test";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryRecordStore>,
    pub config: Arc<MemoryConfigProvider>,
}

pub fn roster() -> Roster {
    Roster {
        staff: vec!["Ana".to_string(), "Luis".to_string()],
        branches: vec!["Centro".to_string(), "Sexta Calle".to_string()],
        targets: TargetConfig {
            per_branch: BTreeMap::from([
                ("Centro".to_string(), dec!(1000)),
                ("Sexta Calle".to_string(), dec!(500)),
            ]),
            personal_global: dec!(300),
        },
    }
}

pub async fn app_with(document: Option<Value>) -> TestApp {
    let store = Arc::new(match document {
        Some(document) => MemoryRecordStore::with_document(BIN_ID, document),
        None => MemoryRecordStore::new(),
    });
    let config = Arc::new(MemoryConfigProvider::new(roster()));
    let repository = TrackerRepository::new(store.clone(), config.clone(), BIN_ID);
    let initial = repository.load_state().await.unwrap();
    let state = AppState::new(repository, initial);

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        config,
    }
}

pub async fn app() -> TestApp {
    app_with(None).await
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }
}
