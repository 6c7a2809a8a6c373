//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REST handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&items)                            │
//! │       ▼                                                                 │
//! │  TransactionRepository ──► inventory::take_stock (same unit of work)   │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and name search
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`inventory`] - Inventory Ledger, operating inside a caller's transaction
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout Engine
//! - [`ReportRepository`](report::ReportRepository) - Reporting Aggregator

use chrono::{DateTime, Utc};

pub mod category;
pub mod inventory;
pub mod product;
pub mod report;
pub mod transaction;

/// Storage format for timestamps: fixed-width RFC 3339 with milliseconds.
///
/// Matches the `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')` column default, so
/// window bounds compare correctly as text.
pub const STORAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formats a UTC instant the way the schema stores it.
pub fn to_storage_timestamp(at: DateTime<Utc>) -> String {
    at.format(STORAGE_TIMESTAMP_FORMAT).to_string()
}
