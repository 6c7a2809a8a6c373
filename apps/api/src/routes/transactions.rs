use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use kasir_core::Transaction;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/transactions/{id} -- a recorded sale with its detail lines.
async fn get_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path(id) = path?;
    state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/transactions/{id}", get(get_transaction))
}
