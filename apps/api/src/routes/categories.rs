//! Category endpoints. Same shape as products, without a filter.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use kasir_core::validation::validate_category;
use kasir_core::{Category, CategoryInput};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;
    validate_category(&input)?;

    let category = state.db.categories().insert(&input).await?;
    info!(category_id = %category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = path?;
    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    validate_category(&input)?;

    let category = state.db.categories().update(id, &input).await?;
    info!(category_id = %id, "Category updated");

    Ok(Json(category))
}

async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = path?;
    state.db.categories().delete(id).await?;
    info!(category_id = %id, "Category deleted");

    Ok(Json(json!({ "message": "Category deleted" })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
