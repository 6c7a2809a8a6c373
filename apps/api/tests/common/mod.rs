//! Shared helpers for router integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kasir_api::{build_router, AppState};
use kasir_db::{Database, DbConfig};

/// Build the full application router over a fresh in-memory database.
///
/// The returned `Database` shares the router's pool, so tests can assert on
/// stored state directly.
pub async fn build_test_app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    let app = build_router(AppState::new(db.clone()));
    (app, db)
}

/// Send a request with an optional JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Create a product through the API and return its id.
pub async fn create_product(app: &Router, name: &str, price: i64, stock: i64) -> i64 {
    let response = post_json(
        app,
        "/api/products",
        serde_json::json!({ "name": name, "price": price, "stock": stock }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["id"].as_i64().unwrap()
}
