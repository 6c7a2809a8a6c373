//! # Checkout Rules
//!
//! The pure half of the Checkout Engine: request validation, line pricing
//! and total accumulation. The database half (stock decrement, persistence,
//! commit) lives in `kasir-db`.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_items(&items)        ← THIS MODULE (before any storage I/O)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  for each item (input order):                                          │
//! │       take stock (guarded UPDATE … RETURNING name, price)              │
//! │       price_line(..)           ← THIS MODULE                           │
//! │       totals.add(&line)        ← THIS MODULE                           │
//! │  INSERT header, INSERT details                                         │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CheckoutItem;
use crate::validation::ValidationResult;

/// A priced checkout line, ready to become a detail row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub subtotal: i64,
}

/// Validates the shape of a checkout request.
///
/// ## Rules
/// - At least one item
/// - Every quantity strictly positive
///
/// The offending line is named by its zero-based index.
pub fn validate_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for (index, item) in items.iter().enumerate() {
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("items[{index}].quantity"),
            });
        }
    }

    Ok(())
}

/// Prices one line at the unit price read inside the checkout unit of work.
pub fn price_line(
    product_id: i64,
    product_name: &str,
    unit_price: Money,
    quantity: i64,
) -> CoreResult<PricedLine> {
    let subtotal = unit_price
        .checked_mul_quantity(quantity)
        .ok_or(CoreError::AmountOverflow { product_id })?;

    Ok(PricedLine {
        product_id,
        product_name: product_name.to_string(),
        unit_price: unit_price.minor(),
        quantity,
        subtotal: subtotal.minor(),
    })
}

/// Builds the error for a line whose product exists but cannot cover the
/// requested quantity.
pub fn insufficient_stock(
    product_id: i64,
    name: &str,
    available: i64,
    requested: i64,
) -> CoreError {
    CoreError::InsufficientStock {
        product_id,
        name: name.to_string(),
        available,
        requested,
    }
}

/// Running total of a checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutTotals {
    total: Money,
}

impl CheckoutTotals {
    /// Adds a priced line to the total.
    pub fn add(&mut self, line: &PricedLine) -> CoreResult<()> {
        self.total = self
            .total
            .checked_add(Money::from_minor(line.subtotal))
            .ok_or(CoreError::AmountOverflow {
                product_id: line.product_id,
            })?;
        Ok(())
    }

    /// The accumulated total.
    pub fn total(&self) -> Money {
        self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
