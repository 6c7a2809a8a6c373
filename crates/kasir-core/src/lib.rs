//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate holds the domain rules of the point-of-sale backend as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (apps/api)                          │   │
//! │  │    /api/products  /api/categories  /api/checkout  /api/report   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │     Inventory Ledger, Checkout Engine, Reporting Aggregator     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │  pricing  │  │  windows  │  │   │
//! │  │   │Transaction│  │           │  │  totals   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Transaction, DailyReport)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Checkout request validation and line pricing
//! - [`report`] - Reporting window computation and date parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for products and categories
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::price_line;
//! use kasir_core::money::Money;
//!
//! let line = price_line(7, "Teh Botol", Money::from_minor(1000), 2).unwrap();
//! assert_eq!(line.subtotal, 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::ReportWindow;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Calendar date format accepted by the range report (`YYYY-MM-DD`).
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Maximum length of a category description.
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 500;
