//! Raw record store proxy.
//!
//! Lets a browser client read and write a bin without ever seeing the
//! master key. Mounted at `/api`, outside the versioned routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the proxy routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/jsonbin-load", get(load))
        .route("/api/jsonbin-save", post(save))
}

/// Query parameters for a load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadParams {
    /// Bin to read.
    pub bin_id: Option<String>,
}

/// Body of a save.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Bin to write.
    pub bin_id: Option<String>,
    /// Document to store.
    pub payload: Option<Value>,
}

fn required_bin(bin_id: Option<String>) -> ApiResult<String> {
    bin_id
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::validation("binId is required"))
}

/// GET /api/jsonbin-load?binId=
async fn load(
    State(state): State<AppState>,
    Query(params): Query<LoadParams>,
) -> ApiResult<Json<Value>> {
    let bin_id = required_bin(params.bin_id)?;

    let record = state.repository.store().load(&bin_id).await?;

    Ok(Json(json!({ "record": record })))
}

/// POST /api/jsonbin-save
async fn save(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let bin_id = required_bin(request.bin_id)?;
    let document = request
        .payload
        .filter(|p| !p.is_null())
        .ok_or_else(|| ApiError::validation("payload is required"))?;

    let data = state.repository.store().save(&bin_id, &document).await?;
    info!(bin_id = %bin_id, "Document replaced through proxy");

    if bin_id == state.repository.bin_id()
        && let Err(e) = state.reload().await
    {
        warn!(error = %e.0, "Tracked document replaced but reload failed");
    }

    Ok(Json(json!({ "ok": true, "data": data })))
}
