//! Route modules. Each exposes a `router()` mounted by
//! [`build_router`](crate::router::build_router).

pub mod categories;
pub mod checkout;
pub mod health;
pub mod products;
pub mod reports;
pub mod transactions;

use axum::Router;

use crate::state::AppState;

/// All routes nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(categories::router())
        .merge(checkout::router())
        .merge(transactions::router())
        .merge(reports::router())
}
