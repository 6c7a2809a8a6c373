//! # Validation Module
//!
//! Input validation for the product and category collaborators.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: REST API (axum)                                              │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + checkout::validate_items                       │
//! │  └── Business rule validation, before any storage access               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (price >= 0), CHECK (stock >= 0)                            │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CategoryInput, ProductInput};
use crate::{MAX_CATEGORY_DESCRIPTION_LEN, MAX_CATEGORY_NAME_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, length-limited display name.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_name;
///
/// assert!(validate_name("name", "Indomie Goreng", 200).is_ok());
/// assert!(validate_name("name", "   ", 200).is_err());
/// ```
pub fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a non-negative integer field (price, stock).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates product fields before create/update.
pub fn validate_product(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_PRODUCT_NAME_LEN)?;
    validate_non_negative("price", input.price)?;
    validate_non_negative("stock", input.stock)?;
    Ok(())
}

/// Validates category fields before create/update.
pub fn validate_category(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_CATEGORY_NAME_LEN)?;

    if input.description.chars().count() > MAX_CATEGORY_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_CATEGORY_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: i64, stock: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price,
            stock,
            category_id: None,
        }
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product("Teh Botol", 4000, 10)).is_ok());
        assert!(validate_product(&product("Free sample", 0, 0)).is_ok());

        assert!(validate_product(&product("", 4000, 10)).is_err());
        assert!(validate_product(&product("Teh Botol", -1, 10)).is_err());
        assert!(validate_product(&product("Teh Botol", 4000, -1)).is_err());
        assert!(validate_product(&product(&"A".repeat(201), 4000, 10)).is_err());
    }

    #[test]
    fn test_validate_category() {
        let ok = CategoryInput {
            name: "Makanan".to_string(),
            description: "Food".to_string(),
        };
        assert!(validate_category(&ok).is_ok());

        let long_description = CategoryInput {
            name: "Makanan".to_string(),
            description: "x".repeat(501),
        };
        assert_eq!(
            validate_category(&long_description).unwrap_err(),
            ValidationError::TooLong {
                field: "description".to_string(),
                max: 500
            }
        );
    }
}
