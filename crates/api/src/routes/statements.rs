//! Staff statement routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracker_core::statement::{StaffStatement, StatementService};
use tracker_shared::types::{format_amount, format_percent};

use super::parse_date_param;
use crate::AppState;
use crate::error::ApiResult;

/// Creates the statement routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/statements/{staff}", get(get_statement))
}

/// Query parameters for a statement.
#[derive(Debug, Deserialize)]
pub struct StatementParams {
    /// Statement of the cycle as it stood on this date.
    pub as_of: Option<String>,
}

/// Statement plus display strings for printing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    /// The statement.
    #[serde(flatten)]
    pub statement: StaffStatement,
    /// Total formatted as money.
    pub total_display: String,
    /// Target formatted as money.
    pub target_display: String,
    /// Progress formatted as a percentage.
    pub percent_display: String,
}

/// GET /statements/{staff}
async fn get_statement(
    State(state): State<AppState>,
    Path(staff): Path<String>,
    Query(params): Query<StatementParams>,
) -> ApiResult<Json<StatementResponse>> {
    let as_of = parse_date_param("as_of", params.as_of.as_deref())?;

    let statement = StatementService::build(&*state.current().await, &staff, as_of)?;

    Ok(Json(StatementResponse {
        total_display: format_amount(statement.progress.total),
        target_display: format_amount(statement.progress.target),
        percent_display: format_percent(statement.progress.percent),
        statement,
    }))
}
