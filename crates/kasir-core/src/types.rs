//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│     Product     │◄┄┄│ TransactionDetail   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  product_id (ref)   │   │
//! │  │  name           │   │  name, price    │   │  product_name (snap)│   │
//! │  │  description    │   │  stock          │   │  quantity, subtotal │   │
//! │  └─────────────────┘   └─────────────────┘   └──────────┬──────────┘   │
//! │                                                         │ 1..*         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────┴──────────┐   │
//! │  │  CheckoutItem   │   │   DailyReport   │   │    Transaction      │   │
//! │  │  (request only) │   │   (derived)     │   │  id, total_amount   │   │
//! │  │  product_id     │   │  revenue, count │   │  created_at         │   │
//! │  │  quantity       │   │  top_product    │   │  details            │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A detail row copies the product name and the price-derived subtotal at
//! sale time. `product_id` is a plain reference, so renaming or deleting the
//! product later never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Display name shown to the cashier and copied onto sold lines.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Optional category this product is filed under.
    pub category_id: Option<i64>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price)
    }

    /// Checks if `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Writable product fields, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Writable category fields, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Checkout
// =============================================================================

/// One requested line of a checkout. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    /// Creates a checkout line.
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

/// A completed sale. Append-only: created once per successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Sum of all detail subtotals.
    pub total_amount: i64,

    /// Storage-assigned creation time (UTC).
    pub created_at: DateTime<Utc>,

    /// Sold lines, in checkout input order.
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_amount)
    }
}

/// One sold line of a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Owning transaction.
    pub transaction_id: i64,

    /// Product sold (reference only).
    pub product_id: i64,

    /// Product name at the time of sale.
    pub product_name: String,

    /// Units sold.
    pub quantity: i64,

    /// Unit price at the time of sale × quantity.
    pub subtotal: i64,
}

// =============================================================================
// Reporting
// =============================================================================

/// Revenue summary over a reporting window. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Sum of `total_amount` over transactions in the window.
    pub total_revenue: i64,

    /// Number of transactions in the window.
    pub total_transaction_count: i64,

    /// Best-selling product by units, absent when nothing sold.
    pub top_product: Option<TopProduct>,
}

impl DailyReport {
    /// A report for a window with no sales.
    pub const fn empty() -> Self {
        DailyReport {
            total_revenue: 0,
            total_transaction_count: 0,
            top_product: None,
        }
    }
}

/// The best-selling product of a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopProduct {
    pub name: String,
    pub quantity_sold: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_can_sell() {
        let product = Product {
            id: 1,
            name: "Indomie Goreng".to_string(),
            price: 3500,
            stock: 3,
            category_id: None,
        };

        assert!(product.can_sell(3));
        assert!(!product.can_sell(4));
        assert_eq!(product.price().minor(), 3500);
    }

    #[test]
    fn test_empty_report_serialization() {
        let json = serde_json::to_value(DailyReport::empty()).unwrap();
        assert_eq!(json["total_revenue"], 0);
        assert_eq!(json["total_transaction_count"], 0);
        assert!(json["top_product"].is_null());
    }

    #[test]
    fn test_category_input_description_defaults_to_empty() {
        let input: CategoryInput = serde_json::from_str(r#"{"name":"Minuman"}"#).unwrap();
        assert_eq!(input.description, "");
    }
}
