//! # Inventory Ledger
//!
//! Stock decrements that run inside a caller-owned unit of work.
//!
//! ## Guarded Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products SET stock = stock - :qty                               │
//! │  WHERE id = :id AND stock >= :qty                                       │
//! │  RETURNING name, price, stock                                           │
//! │       │                                                                 │
//! │       ├── row returned ──► StockTake (stock never goes negative)       │
//! │       │                                                                 │
//! │       └── no row ──► SELECT name, stock WHERE id = :id                  │
//! │                          ├── no row   ──► ProductNotFound               │
//! │                          └── row      ──► InsufficientStock             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first decrement of a checkout takes the SQLite write lock, so the
//! stock check and the decrement can never interleave with another
//! checkout. Competing checkouts queue on the lock (busy timeout) and
//! re-evaluate the guard against the committed stock.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::SalesResult;
use kasir_core::checkout;
use kasir_core::CoreError;

/// The outcome of a successful decrement.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StockTake {
    /// Product name at the moment of sale.
    pub name: String,

    /// Unit price at the moment of sale.
    pub price: i64,

    /// Stock left after the decrement.
    pub stock: i64,
}

/// Decrements stock by `quantity` if enough is on hand.
///
/// ## Errors
/// * `CoreError::ProductNotFound` - no such product
/// * `CoreError::InsufficientStock` - stock is below `quantity`; nothing changed
pub async fn take_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> SalesResult<StockTake> {
    let taken = sqlx::query_as::<_, StockTake>(
        r#"
        UPDATE products SET stock = stock - ?1
        WHERE id = ?2 AND stock >= ?1
        RETURNING name, price, stock
        "#,
    )
    .bind(quantity)
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(taken) = taken {
        debug!(
            product_id = %product_id,
            quantity = %quantity,
            remaining = %taken.stock,
            "Stock taken"
        );
        return Ok(taken);
    }

    let current: Option<(String, i64)> =
        sqlx::query_as("SELECT name, stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

    match current {
        None => Err(CoreError::ProductNotFound(product_id).into()),
        Some((name, available)) => {
            Err(checkout::insufficient_stock(product_id, &name, available, quantity).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, SalesErrorKind};
    use kasir_core::ProductInput;

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&ProductInput {
                name: "Kopi Sachet".to_string(),
                price: 1500,
                stock: 4,
                category_id: None,
            })
            .await
            .unwrap();
        (db, product.id)
    }

    async fn stock_level(conn: &mut SqliteConnection, product_id: i64) -> Option<i64> {
        sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_take_stock_decrements() {
        let (db, id) = setup().await;
        let mut tx = db.pool().begin().await.unwrap();

        let taken = take_stock(&mut tx, id, 3).await.unwrap();
        assert_eq!(taken.name, "Kopi Sachet");
        assert_eq!(taken.price, 1500);
        assert_eq!(taken.stock, 1);
        assert_eq!(stock_level(&mut tx, id).await, Some(1));

        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_take_stock_exact_amount_reaches_zero() {
        let (db, id) = setup().await;
        let mut tx = db.pool().begin().await.unwrap();

        let taken = take_stock(&mut tx, id, 4).await.unwrap();
        assert_eq!(taken.stock, 0);
    }

    #[tokio::test]
    async fn test_take_stock_insufficient_leaves_stock() {
        let (db, id) = setup().await;
        let mut tx = db.pool().begin().await.unwrap();

        let err = take_stock(&mut tx, id, 5).await.unwrap_err();
        assert_eq!(err.kind(), SalesErrorKind::InsufficientStock);
        assert_eq!(stock_level(&mut tx, id).await, Some(4));
    }

    #[tokio::test]
    async fn test_take_stock_unknown_product() {
        let (db, id) = setup().await;
        let mut tx = db.pool().begin().await.unwrap();

        let err = take_stock(&mut tx, id + 1, 1).await.unwrap_err();
        assert_eq!(err.kind(), SalesErrorKind::ProductNotFound);
        assert_eq!(stock_level(&mut tx, id + 1).await, None);
    }
}
