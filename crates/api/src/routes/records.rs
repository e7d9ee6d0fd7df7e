//! Record routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, post},
};
use tracing::info;
use tracker_core::record::{NewSalesRecord, SalesRecord};
use tracker_shared::types::RecordId;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", post(create_record))
        .route("/records/{id}", delete(delete_record))
}

/// POST /records
async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<NewSalesRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SalesRecord>)> {
    let Json(input) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let id = RecordId::generate();

    let record = state
        .mutate(|current| Ok(current.with_record(id, input)?))
        .await?;

    info!(
        record_id = %record.id,
        staff = %record.staff,
        branch = %record.branch,
        amount = %record.amount,
        "Record added"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /records/{id}
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SalesRecord>> {
    let id = RecordId::from(id);

    let removed = state
        .mutate(|current| Ok(current.without_record(&id)?))
        .await?;

    info!(record_id = %removed.id, "Record deleted");
    Ok(Json(removed))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{BIN_ID, app, app_with};

    fn sale() -> serde_json::Value {
        json!({ "date": "2024-06-05", "staff": "Ana", "branch": "Centro", "amount": 125.5, "note": "cash" })
    }

    #[tokio::test]
    async fn test_create_record_persists_and_updates_state() {
        let app = app().await;

        let (status, body) = app.post("/api/v1/records", sale()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_str().unwrap().starts_with("r_"));
        assert_eq!(body["amount"], "125.5");

        let stored = app.store.document(BIN_ID).await.unwrap();
        assert_eq!(stored["records"].as_array().unwrap().len(), 1);
        assert!(stored["meta"]["updatedAt"].is_string());

        let (_, dashboard) = app.get("/api/v1/dashboard?day=2024-06-05").await;
        assert_eq!(dashboard["totals"]["dayTotal"], "125.5");
    }

    #[tokio::test]
    async fn test_create_record_rejects_invalid_input() {
        let app = app().await;

        let (status, body) = app
            .post(
                "/api/v1/records",
                json!({ "date": "2024-06-05", "staff": "Ana", "branch": "Centro", "amount": 0 }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(app.store.document(BIN_ID).await.is_none());
    }

    #[tokio::test]
    async fn test_create_record_rejects_oversized_amount() {
        let app = app().await;
        let sale = json!({
            "date": "2024-06-05",
            "staff": "Ana",
            "branch": "Centro",
            "amount": "79228162514264337593543950335"
        });

        let (status, body) = app.post("/api/v1/records", sale).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(app.store.document(BIN_ID).await.is_none());

        let (status, _) = app.get("/api/v1/dashboard?day=2024-06-05").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_record_keeps_unreadable_stored_entries() {
        let app = app_with(Some(json!({
            "records": [
                { "id": "keep", "date": "2024-06-04", "staff": "Ana", "branch": "Centro", "amount": "10" },
                { "id": "legacy", "date": "05/06/2024", "staff": "Ana", "branch": "Centro", "amount": "7" }
            ]
        })))
        .await;

        let (status, _) = app.post("/api/v1/records", sale()).await;
        assert_eq!(status, StatusCode::CREATED);

        let stored = app.store.document(BIN_ID).await.unwrap();
        let ids: Vec<&str> = stored["records"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["id"].as_str())
            .collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "keep");
        assert!(ids.contains(&"legacy"));
        assert_eq!(app.state.current().await.records().len(), 2);
    }

    #[tokio::test]
    async fn test_create_record_rejects_malformed_json() {
        let app = app().await;

        let (status, body) = app
            .post("/api/v1/records", json!({ "date": "June", "amount": "lots" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_store_failure_leaves_state_unchanged() {
        let app = app().await;
        app.store.set_unavailable(true);

        let (status, body) = app.post("/api/v1/records", sale()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "COLLABORATOR_UNAVAILABLE");
        assert!(app.state.current().await.records().is_empty());
    }

    #[tokio::test]
    async fn test_delete_record() {
        let app = app_with(Some(json!({
            "records": [
                { "id": "r1", "date": "2024-06-05", "staff": "Ana", "branch": "Centro", "amount": "10" }
            ]
        })))
        .await;

        let (status, body) = app.send("DELETE", "/api/v1/records/r1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "r1");
        assert!(app.state.current().await.records().is_empty());

        let (status, body) = app.send("DELETE", "/api/v1/records/r1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
