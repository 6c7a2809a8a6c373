//! # Report Repository
//!
//! The Reporting Aggregator: revenue, transaction count and best-selling
//! product over a half-open UTC window `[start, end)`.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportWindow { start, end }                                           │
//! │       │                                                                 │
//! │       │  bounds bound as storage timestamps (text compares in order)   │
//! │       ▼                                                                 │
//! │  BEGIN (read)                                                           │
//! │    SUM(total_amount), COUNT(*)      FROM transactions      in window   │
//! │    SUM(quantity) GROUP BY product   FROM transaction_details           │
//! │       ORDER BY quantity DESC, product_id ASC  LIMIT 1                  │
//! │  COMMIT                                                                 │
//! │       ▼                                                                 │
//! │  DailyReport { total_revenue, total_transaction_count, top_product }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both queries run in one read transaction, so a checkout committing in
//! between cannot make the totals and the top product disagree.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::to_storage_timestamp;
use crate::error::SalesResult;
use kasir_core::{DailyReport, ReportWindow, TopProduct};

/// Repository for sales reports. Read-only.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Report for the current UTC calendar day.
    pub async fn daily_report(&self) -> SalesResult<DailyReport> {
        self.daily_report_at(Utc::now()).await
    }

    /// Report for the UTC calendar day containing `now`.
    pub async fn daily_report_at(&self, now: DateTime<Utc>) -> SalesResult<DailyReport> {
        self.report_for_window(ReportWindow::today(now)).await
    }

    /// Report for an inclusive range of `YYYY-MM-DD` dates.
    ///
    /// ## Errors
    /// * `Validation` - malformed date, or `end` before `start`
    pub async fn report_by_range(&self, start: &str, end: &str) -> SalesResult<DailyReport> {
        let window = ReportWindow::from_date_strings(start, end)?;
        self.report_for_window(window).await
    }

    /// Report over an explicit window.
    pub async fn report_for_window(&self, window: ReportWindow) -> SalesResult<DailyReport> {
        let start = to_storage_timestamp(window.start);
        let end = to_storage_timestamp(window.end);

        debug!(start = %start, end = %end, "Building sales report");

        let mut tx = self.pool.begin().await?;

        let (total_revenue, total_transaction_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&mut *tx)
        .await?;

        // Current product name when the product still exists, otherwise the
        // name recorded at sale time.
        let top_product = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT
                COALESCE(MAX(p.name), MAX(td.product_name)) AS name,
                SUM(td.quantity) AS quantity_sold
            FROM transaction_details td
            JOIN transactions t ON td.transaction_id = t.id
            LEFT JOIN products p ON td.product_id = p.id
            WHERE t.created_at >= ?1 AND t.created_at < ?2
            GROUP BY td.product_id
            ORDER BY quantity_sold DESC, td.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            total_revenue = %total_revenue,
            total_transaction_count = %total_transaction_count,
            "Sales report built"
        );

        Ok(DailyReport {
            total_revenue,
            total_transaction_count,
            top_product,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, SalesErrorKind};
    use chrono::TimeZone;
    use kasir_core::{CheckoutItem, ProductInput};

    async fn add_product(db: &Database, name: &str, price: i64, stock: i64) -> i64 {
        db.products()
            .insert(&ProductInput {
                name: name.to_string(),
                price,
                stock,
                category_id: None,
            })
            .await
            .unwrap()
            .id
    }

    /// Records a sale at a fixed instant, bypassing the checkout clock.
    async fn record_at(db: &Database, at: &str, lines: &[(i64, &str, i64, i64)]) {
        let total: i64 = lines.iter().map(|(_, _, _, subtotal)| subtotal).sum();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2) RETURNING id",
        )
        .bind(total)
        .bind(at)
        .fetch_one(db.pool())
        .await
        .unwrap();

        for &(product_id, name, quantity, subtotal) in lines {
            sqlx::query(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, product_name, quantity, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(id)
            .bind(product_id)
            .bind(name)
            .bind(quantity)
            .bind(subtotal)
            .execute(db.pool())
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_report() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let report = db.reports().daily_report().await.unwrap();
        assert_eq!(report, DailyReport::empty());
    }

    #[tokio::test]
    async fn test_daily_report_after_checkout() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = add_product(&db, "Indomie", 1000, 5).await;
        let b = add_product(&db, "Teh Botol", 2000, 3).await;

        db.transactions()
            .checkout(&[CheckoutItem::new(a, 2), CheckoutItem::new(b, 1)])
            .await
            .unwrap();

        let report = db.reports().daily_report().await.unwrap();
        assert_eq!(report.total_revenue, 4000);
        assert_eq!(report.total_transaction_count, 1);
        let top = report.top_product.unwrap();
        assert_eq!(top.name, "Indomie");
        assert_eq!(top.quantity_sold, 2);
    }

    #[tokio::test]
    async fn test_range_report_respects_day_boundaries() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = add_product(&db, "Indomie", 1000, 100).await;
        let b = add_product(&db, "Teh Botol", 2000, 100).await;

        record_at(&db, "2024-01-01T00:00:00.000Z", &[(a, "Indomie", 1, 1000)]).await;
        record_at(&db, "2024-01-01T23:59:59.999Z", &[(b, "Teh Botol", 2, 4000)]).await;
        record_at(&db, "2024-01-02T00:00:00.000Z", &[(a, "Indomie", 9, 9000)]).await;

        let jan1 = db
            .reports()
            .report_by_range("2024-01-01", "2024-01-01")
            .await
            .unwrap();
        assert_eq!(jan1.total_revenue, 5000);
        assert_eq!(jan1.total_transaction_count, 2);
        assert_eq!(jan1.top_product.unwrap().name, "Teh Botol");

        let jan2 = db
            .reports()
            .daily_report_at(Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap())
            .await
            .unwrap();
        assert_eq!(jan2.total_revenue, 9000);
        assert_eq!(jan2.total_transaction_count, 1);

        let both = db
            .reports()
            .report_by_range("2024-01-01", "2024-01-02")
            .await
            .unwrap();
        assert_eq!(both.total_revenue, 14000);
        assert_eq!(both.total_transaction_count, 3);
        let top = both.top_product.unwrap();
        assert_eq!(top.name, "Indomie");
        assert_eq!(top.quantity_sold, 10);

        let dec31 = db
            .reports()
            .report_by_range("2023-12-31", "2023-12-31")
            .await
            .unwrap();
        assert_eq!(dec31, DailyReport::empty());
    }

    #[tokio::test]
    async fn test_top_product_tie_breaks_on_lowest_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = add_product(&db, "Indomie", 1000, 100).await;
        let b = add_product(&db, "Teh Botol", 2000, 100).await;

        record_at(&db, "2024-03-05T08:00:00.000Z", &[(b, "Teh Botol", 3, 6000)]).await;
        record_at(&db, "2024-03-05T09:00:00.000Z", &[(a, "Indomie", 3, 3000)]).await;

        let report = db
            .reports()
            .report_by_range("2024-03-05", "2024-03-05")
            .await
            .unwrap();
        let top = report.top_product.unwrap();
        assert_eq!(top.name, "Indomie");
        assert_eq!(top.quantity_sold, 3);
    }

    #[tokio::test]
    async fn test_top_product_uses_snapshot_name_after_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = add_product(&db, "Kerupuk", 500, 10).await;

        record_at(&db, "2024-03-05T08:00:00.000Z", &[(a, "Kerupuk", 4, 2000)]).await;
        db.products().delete(a).await.unwrap();

        let report = db
            .reports()
            .report_by_range("2024-03-05", "2024-03-05")
            .await
            .unwrap();
        assert_eq!(report.top_product.unwrap().name, "Kerupuk");
    }

    #[tokio::test]
    async fn test_report_is_repeatable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = add_product(&db, "Indomie", 1000, 10).await;
        record_at(&db, "2024-05-01T10:00:00.000Z", &[(a, "Indomie", 2, 2000)]).await;

        let first = db
            .reports()
            .report_by_range("2024-05-01", "2024-05-01")
            .await
            .unwrap();
        let second = db
            .reports()
            .report_by_range("2024-05-01", "2024-05-01")
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_ranges_are_validation_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for (start, end) in [
            ("2024-13-01", "2024-13-02"),
            ("01/01/2024", "2024-01-02"),
            ("2024-01-02", "2024-01-01"),
            ("", "2024-01-01"),
        ] {
            let err = db.reports().report_by_range(start, end).await.unwrap_err();
            assert_eq!(err.kind(), SalesErrorKind::Validation, "{start}..{end}");
        }
    }
}
