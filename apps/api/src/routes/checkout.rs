//! POST /api/checkout: sell a list of items as one transaction.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use kasir_core::{CheckoutItem, Transaction};

use crate::error::ApiResult;
use crate::state::AppState;

/// Checkout request body: `{"items": [{"product_id": 1, "quantity": 2}]}`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = payload?;
    let sale = state.db.transactions().checkout(&request.items).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout))
}
