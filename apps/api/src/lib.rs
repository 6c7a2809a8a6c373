//! # kasir-api: REST Server for Kasir POS
//!
//! HTTP surface over [`kasir_db`]: catalog CRUD, checkout, recorded sales
//! and sales reports.
//!
//! ## Module Organization
//!
//! - [`config`] - `ServerConfig` from environment variables
//! - [`error`] - `ApiError` and its status/JSON mapping
//! - [`router`] - Router construction with middleware
//! - [`routes`] - Handlers, one module per resource
//! - [`state`] - Shared handler state

pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
