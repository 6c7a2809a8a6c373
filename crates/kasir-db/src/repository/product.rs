//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Case-insensitive name search
//!
//! Stock is only ever decremented by the checkout unit of work (see
//! [`inventory`](super::inventory)); this repository sets it as an absolute
//! value on create and update.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Product, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, category_id";

/// Escapes LIKE wildcards so the filter matches them literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let results = repo.list(Some("indomie")).await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id, optionally filtered by name.
    ///
    /// ## Arguments
    /// * `name` - Substring to match (case-insensitive for ASCII). Blank
    ///   filters are ignored.
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(escape_like);

        debug!(name = ?name, "Listing products");

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ?1 IS NULL OR name LIKE '%' || ?1 || '%' ESCAPE '\'
            ORDER BY id
            "#
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown category_id
    pub async fn insert(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, "Inserting product");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Past transaction details keep their snapshot of the product.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
