//! # Transaction Repository
//!
//! The Checkout Engine: turns a list of requested items into one committed
//! sale, and loads recorded sales back.
//!
//! ## Checkout Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(&items)                                                      │
//! │       │                                                                 │
//! │       ├── validate_items ──► Err(Validation)   (no storage touched)     │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │       ├── for each item, in request order:                             │
//! │       │       inventory::take_stock  ──► Err ──► ROLLBACK              │
//! │       │       price_line + totals.add                                  │
//! │       │                                                                 │
//! │       ├── INSERT transactions (total_amount)                           │
//! │       ├── INSERT transaction_details (one per item, name snapshot)     │
//! │       ▼                                                                 │
//! │  COMMIT ──► Transaction { id, total_amount, created_at, details }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Either every decrement, the header and every detail become durable
//! together, or none of them do.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error, info, warn};

use super::inventory;
use crate::error::{DbResult, SalesErrorKind, SalesResult};
use kasir_core::checkout::{self, CheckoutTotals};
use kasir_core::{CheckoutItem, Money, Transaction, TransactionDetail};

const DETAIL_COLUMNS: &str = "id, transaction_id, product_id, product_name, quantity, subtotal";

/// Header row of a recorded sale.
#[derive(Debug, sqlx::FromRow)]
struct TransactionHeader {
    id: i64,
    total_amount: i64,
    created_at: DateTime<Utc>,
}

/// Repository for recorded sales.
///
/// ## Usage
/// ```rust,ignore
/// let sale = db.transactions()
///     .checkout(&[CheckoutItem::new(1, 2), CheckoutItem::new(2, 1)])
///     .await?;
/// println!("Recorded #{} for {}", sale.id, sale.total_amount);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Sells the given items as one transaction.
    ///
    /// Items are processed in request order; a product id may appear more
    /// than once and each occurrence becomes its own detail line.
    ///
    /// ## Errors
    /// * `Validation` - empty list or a quantity ≤ 0
    /// * `ProductNotFound` / `InsufficientStock` - first failing line wins
    /// * `Storage` - the unit of work could not be completed
    ///
    /// On any error nothing is persisted and no stock has changed.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> SalesResult<Transaction> {
        if let Err(err) = checkout::validate_items(items) {
            warn!(error = %err, "Checkout rejected");
            return Err(err.into());
        }

        debug!(lines = items.len(), "Starting checkout");

        let mut tx = self.pool.begin().await?;

        match record_sale(&mut tx, items).await {
            Ok(sale) => {
                tx.commit().await?;
                info!(
                    transaction_id = %sale.id,
                    total_amount = %sale.total_amount,
                    lines = sale.details.len(),
                    "Checkout committed"
                );
                Ok(sale)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Checkout rollback failed");
                }
                match err.kind() {
                    SalesErrorKind::Storage => error!(error = %err, "Checkout failed"),
                    _ => warn!(error = %err, "Checkout rejected"),
                }
                Err(err)
            }
        }
    }

    /// Gets a recorded sale with its details (ordered by detail id).
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM transaction_details WHERE transaction_id = ?1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        }))
    }
}

/// Runs the body of the checkout unit of work on an open transaction.
async fn record_sale(
    conn: &mut SqliteConnection,
    items: &[CheckoutItem],
) -> SalesResult<Transaction> {
    let mut totals = CheckoutTotals::default();
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let taken = inventory::take_stock(conn, item.product_id, item.quantity).await?;
        let line = checkout::price_line(
            item.product_id,
            &taken.name,
            Money::from_minor(taken.price),
            item.quantity,
        )?;
        totals.add(&line)?;
        lines.push(line);
    }

    let header = sqlx::query_as::<_, TransactionHeader>(
        r#"
        INSERT INTO transactions (total_amount)
        VALUES (?1)
        RETURNING id, total_amount, created_at
        "#,
    )
    .bind(totals.total().minor())
    .fetch_one(&mut *conn)
    .await?;

    let mut details = Vec::with_capacity(lines.len());
    for line in &lines {
        let detail = sqlx::query_as::<_, TransactionDetail>(&format!(
            r#"
            INSERT INTO transaction_details
                (transaction_id, product_id, product_name, quantity, subtotal)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {DETAIL_COLUMNS}
            "#
        ))
        .bind(header.id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.subtotal)
        .fetch_one(&mut *conn)
        .await?;
        details.push(detail);
    }

    Ok(Transaction {
        id: header.id,
        total_amount: header.total_amount,
        created_at: header.created_at,
        details,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
