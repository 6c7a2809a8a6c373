//! Sales report endpoints.
//!
//! ```text
//! GET /api/report/today                                  current UTC day
//! GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD   inclusive range
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use kasir_core::{DailyReport, ValidationError};

use crate::error::ApiResult;
use crate::state::AppState;

/// Query string for a range report. Both bounds are required.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ValidationError::Required {
            field: field.to_string(),
        })
}

async fn report_today(State(state): State<AppState>) -> ApiResult<Json<DailyReport>> {
    Ok(Json(state.db.reports().daily_report().await?))
}

async fn report_by_range(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<DailyReport>> {
    let Query(query) = query?;
    let start = required("start_date", query.start_date)?;
    let end = required("end_date", query.end_date)?;

    let report = state.db.reports().report_by_range(&start, &end).await?;
    Ok(Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report/today", get(report_today))
        .route("/report", get(report_by_range))
}
