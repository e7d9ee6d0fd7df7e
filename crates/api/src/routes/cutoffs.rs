//! Cutoff routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::info;
use tracker_core::cutoff::{CutoffBookkeeping, CutoffSnapshot, CutoffState};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the cutoff routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cutoffs", get(list_cutoffs).post(run_cutoff))
}

/// Cutoff state with the full history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffHistoryResponse {
    /// State machine position.
    pub cutoff: CutoffState,
    /// Boundary and snapshots, oldest first.
    #[serde(flatten)]
    pub bookkeeping: CutoffBookkeeping,
}

/// GET /cutoffs
async fn list_cutoffs(State(state): State<AppState>) -> Json<CutoffHistoryResponse> {
    let current = state.current().await;
    let bookkeeping = current.bookkeeping();

    Json(CutoffHistoryResponse {
        cutoff: bookkeeping.state(),
        bookkeeping: bookkeeping.clone(),
    })
}

/// POST /cutoffs
async fn run_cutoff(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<CutoffSnapshot>)> {
    let snapshot = state.mutate(|current| Ok(current.with_cutoff()?)).await?;

    info!(
        cutoff_date = %snapshot.cutoff_date,
        period_start = %snapshot.period_start,
        records = snapshot.record_count,
        "Cutoff recorded"
    );
    Ok((StatusCode::CREATED, Json(snapshot)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{BIN_ID, app, app_with};

    #[tokio::test]
    async fn test_empty_cutoff_is_rejected() {
        let app = app().await;

        let (status, body) = app.post("/api/v1/cutoffs", json!({})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "EMPTY_PERIOD");
        assert!(app.store.document(BIN_ID).await.is_none());
    }

    #[tokio::test]
    async fn test_cutoff_closes_cycle_and_is_listed() {
        let app = app_with(Some(json!({
            "records": [
                { "id": "r1", "date": "2024-05-02", "staff": "Ana", "branch": "Centro", "amount": "400" },
                { "id": "r2", "date": "2024-05-30", "staff": "Luis", "branch": "Centro", "amount": "100" }
            ]
        })))
        .await;

        let (status, snapshot) = app.post("/api/v1/cutoffs", json!({})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(snapshot["cutoffDate"], "2024-05-30");
        assert_eq!(snapshot["periodStart"], "2024-05-02");
        assert_eq!(snapshot["totalsByBranch"]["Centro"], "500");
        assert_eq!(snapshot["targetsAtCutoff"]["perBranch"]["Centro"], "1000");

        let (status, history) = app.get("/api/v1/cutoffs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["cutoff"]["state"], "cutoff_active");
        assert_eq!(history["lastCutoffDate"], "2024-05-30");
        assert_eq!(history["history"].as_array().unwrap().len(), 1);

        let (status, _) = app.post("/api/v1/cutoffs", json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let stored = app.store.document(BIN_ID).await.unwrap();
        assert_eq!(stored["meta"]["lastCutoffDate"], "2024-05-30");
    }

    #[tokio::test]
    async fn test_cutoff_store_failure_keeps_cycle_open() {
        let app = app_with(Some(json!({
            "records": [
                { "id": "r1", "date": "2024-05-02", "staff": "Ana", "branch": "Centro", "amount": "400" }
            ]
        })))
        .await;
        app.store.set_unavailable(true);

        let (status, _) = app.post("/api/v1/cutoffs", json!({})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(app.state.current().await.bookkeeping().last_cutoff_date, None);
    }
}
