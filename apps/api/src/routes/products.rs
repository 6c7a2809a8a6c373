//! Product catalog endpoints.
//!
//! ```text
//! GET    /api/products?name=   list (optional name filter)
//! POST   /api/products         create
//! GET    /api/products/{id}    fetch one
//! PUT    /api/products/{id}    replace name/price/stock/category
//! DELETE /api/products/{id}    remove (recorded sales keep their snapshot)
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use kasir_core::validation::validate_product;
use kasir_core::{Product, ProductInput};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query string for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
}

async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let products = state.db.products().list(query.name.as_deref()).await?;
    Ok(Json(products))
}

async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;
    validate_product(&input)?;

    let product = state.db.products().insert(&input).await?;
    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    validate_product(&input)?;

    let product = state.db.products().update(id, &input).await?;
    info!(product_id = %id, "Product updated");

    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = path?;
    state.db.products().delete(id).await?;
    info!(product_id = %id, "Product deleted");

    Ok(Json(json!({ "message": "Product deleted" })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
