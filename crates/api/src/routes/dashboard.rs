//! Dashboard and calendar routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracker_core::dashboard::{CalendarMonth, DashboardQuery, DashboardService, DashboardView};
use tracker_shared::types::{format_amount, format_local_timestamp, local_today};

use super::parse_date_param;
use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/calendar", get(get_calendar))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// View the cycle as it stood on this date.
    pub as_of: Option<String>,
    /// Day shown in the daily table; defaults to today.
    pub day: Option<String>,
}

/// Query parameters for the calendar.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    /// Month as `YYYY-MM`.
    pub month: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Dashboard view plus display strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// The computed view.
    #[serde(flatten)]
    pub view: DashboardView,
    /// Last save time in local time.
    pub updated_at_display: String,
    /// Cycle total formatted as money.
    pub cycle_total_display: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Json<DashboardResponse>> {
    let as_of = parse_date_param("as_of", params.as_of.as_deref())?;
    let day = parse_date_param("day", params.day.as_deref())?.unwrap_or_else(local_today);

    let view = DashboardService::build(&*state.current().await, DashboardQuery { as_of, day });

    Ok(Json(DashboardResponse {
        updated_at_display: format_local_timestamp(view.updated_at),
        cycle_total_display: format_amount(view.totals.cycle_total),
        view,
    }))
}

/// GET /calendar
async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> ApiResult<Json<CalendarMonth>> {
    let (year, month) = params
        .month
        .as_deref()
        .and_then(parse_month)
        .ok_or_else(|| ApiError::validation("month must be given as YYYY-MM"))?;

    DashboardService::calendar(state.current().await.records(), year, month)
        .map(Json)
        .ok_or_else(|| ApiError::validation("month is out of range"))
}

fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.trim().split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}
