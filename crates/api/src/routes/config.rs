//! Roster and refresh routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;
use tracker_core::roster::Roster;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the config routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/refresh", post(refresh))
}

/// Summary of a reload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Staff in the roster.
    pub staff: usize,
    /// Branches in the roster.
    pub branches: usize,
    /// Records in the document.
    pub records: usize,
}

/// GET /config
async fn get_config(State(state): State<AppState>) -> Json<Roster> {
    Json(state.current().await.roster.clone())
}

/// POST /refresh
async fn refresh(State(state): State<AppState>) -> ApiResult<Json<RefreshResponse>> {
    let fresh = state.reload().await?;

    info!(records = fresh.records().len(), "State refreshed");
    Ok(Json(RefreshResponse {
        staff: fresh.roster.staff.len(),
        branches: fresh.roster.branches.len(),
        records: fresh.records().len(),
    }))
}
