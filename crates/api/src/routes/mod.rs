//! API route definitions.

use axum::Router;
use chrono::NaiveDate;
use tracker_core::record::parse_calendar_date;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

pub mod config;
pub mod cutoffs;
pub mod dashboard;
pub mod health;
pub mod proxy;
pub mod records;
pub mod statements;

/// Creates the API router with all routes under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(records::routes())
        .merge(cutoffs::routes())
        .merge(statements::routes())
        .merge(config::routes())
}

/// Parses an optional `YYYY-MM-DD` query parameter.
pub(crate) fn parse_date_param(name: &str, raw: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_calendar_date(s)
            .map(Some)
            .ok_or_else(|| ApiError::validation(format!("{name} must be a date (YYYY-MM-DD)"))),
    }
}
