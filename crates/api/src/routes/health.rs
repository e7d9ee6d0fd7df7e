//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracker_core::cutoff::CutoffState;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Records currently loaded.
    pub records: usize,
    /// Cutoff state of the loaded document.
    pub cutoff: CutoffState,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.current().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        records: current.records().len(),
        cutoff: current.bookkeeping().state(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::app;

    #[tokio::test]
    async fn test_health_reports_loaded_state() {
        let app = app().await;

        let (status, body) = app.get("/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 0);
        assert_eq!(body["cutoff"]["state"], "no_cutoff_yet");
    }
}
