//! # Daily Log Repository
//!
//! Database operations for daily stock logs.
//!
//! ## The Upsert Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Whole-Day Batch Upsert                                 │
//! │                                                                     │
//! │  upsert_batch([w1, w2, ... wN])                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BEGIN TRANSACTION                                                  │
//! │    for each record:                                                 │
//! │      INSERT INTO daily_logs (...)                                   │
//! │      ON CONFLICT (product_id, date) DO UPDATE SET                   │
//! │        opening/remaining/sales/profit = excluded.*                  │
//! │  COMMIT  (or ROLLBACK on any failure: nothing persisted)            │
//! │                                                                     │
//! │  Properties:                                                        │
//! │  • Idempotent - resubmitting the same inputs is a no-op             │
//! │  • Last-write-wins - a second save fully replaces the first         │
//! │  • All-or-nothing - no partial-day states from a mid-batch failure  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use khata_core::{DailyLog, DailyLogWithProduct, DailyLogWrite, DaySummary, Money};

/// Repository for daily log database operations.
#[derive(Debug, Clone)]
pub struct DailyLogRepository {
    pool: SqlitePool,
}

const LOG_COLUMNS: &str = "id, product_id, date, opening_stock, remaining_stock, \
                           sales_amount_paise, profit_paise, created_at, updated_at";

impl DailyLogRepository {
    /// Creates a new DailyLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DailyLogRepository { pool }
    }

    /// Gets all logs for a date, joined with product display fields.
    ///
    /// Ordered by product name so rows line up with the catalog listing.
    /// A date with no logs is an empty result, not an error.
    pub async fn for_date(&self, date: NaiveDate) -> DbResult<Vec<DailyLogWithProduct>> {
        debug!(date = %date, "Fetching logs for date");

        let rows = sqlx::query_as::<_, DailyLogWithProduct>(
            r#"
            SELECT
                l.id,
                l.product_id,
                l.date,
                l.opening_stock,
                l.remaining_stock,
                l.sales_amount_paise,
                l.profit_paise,
                p.name AS product_name,
                p.category,
                p.cost_price_paise,
                p.selling_price_paise,
                p.box_number
            FROM daily_logs l
            INNER JOIN products p ON p.id = l.product_id
            WHERE l.date = ?1
            ORDER BY p.name ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Fetched logs");
        Ok(rows)
    }

    /// Gets the log for one product on one date, if any.
    pub async fn get(&self, product_id: &str, date: NaiveDate) -> DbResult<Option<DailyLog>> {
        let log = sqlx::query_as::<_, DailyLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM daily_logs WHERE product_id = ?1 AND date = ?2"
        ))
        .bind(product_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    /// Writes a whole day's batch in one transaction.
    ///
    /// Each record is an insert-or-overwrite keyed on (product_id, date):
    /// a fresh row gets a generated id, a conflicting row keeps its id and
    /// has its numeric fields replaced wholesale. No merging, no
    /// accumulation. Any failure rolls the entire batch back and nothing
    /// from this call is persisted.
    ///
    /// ## Returns
    /// The stored rows, one per input record, in input order.
    pub async fn upsert_batch(&self, records: &[DailyLogWrite]) -> DbResult<Vec<DailyLog>> {
        debug!(count = records.len(), "Upserting daily log batch");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO daily_logs (
                    id, product_id, date, opening_stock, remaining_stock,
                    sales_amount_paise, profit_paise, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT (product_id, date) DO UPDATE SET
                    opening_stock = excluded.opening_stock,
                    remaining_stock = excluded.remaining_stock,
                    sales_amount_paise = excluded.sales_amount_paise,
                    profit_paise = excluded.profit_paise,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(generate_log_id())
            .bind(&record.product_id)
            .bind(record.date)
            .bind(record.opening_stock)
            .bind(record.remaining_stock)
            .bind(record.sales_amount_paise)
            .bind(record.profit_paise)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        // Read the stored rows back inside the same transaction so the
        // caller sees exactly what was committed.
        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            let log = sqlx::query_as::<_, DailyLog>(&format!(
                "SELECT {LOG_COLUMNS} FROM daily_logs WHERE product_id = ?1 AND date = ?2"
            ))
            .bind(&record.product_id)
            .bind(record.date)
            .fetch_one(&mut *tx)
            .await?;
            stored.push(log);
        }

        tx.commit().await?;

        debug!(count = stored.len(), "Daily log batch committed");
        Ok(stored)
    }

    /// Sums sales and profit across a date's logs.
    ///
    /// A date with no logs sums to zero.
    pub async fn summary_for_date(&self, date: NaiveDate) -> DbResult<DaySummary> {
        let (sales, profit): (Option<i64>, Option<i64>) = sqlx::query_as(
            r#"
            SELECT SUM(sales_amount_paise), SUM(profit_paise)
            FROM daily_logs
            WHERE date = ?1
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(DaySummary {
            total_sales: Money::from_paise(sales.unwrap_or(0)),
            total_profit: Money::from_paise(profit.unwrap_or(0)),
        })
    }

    /// Counts all stored logs (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new daily log row ID.
pub fn generate_log_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use khata_core::ProductInput;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, cost: i64, selling: i64) -> String {
        db.products()
            .create(&ProductInput {
                name: name.to_string(),
                category: Some("General".to_string()),
                cost_price_paise: cost,
                selling_price_paise: selling,
                box_number: Some("B-1".to_string()),
            })
            .await
            .unwrap()
            .id
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn write(product_id: &str, opening: f64, remaining: f64, sales: i64, profit: i64) -> DailyLogWrite {
        DailyLogWrite {
            product_id: product_id.to_string(),
            date: day(),
            opening_stock: opening,
            remaining_stock: remaining,
            sales_amount_paise: sales,
            profit_paise: profit,
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites() {
        let db = test_db().await;
        let pid = seed_product(&db, "Parle-G", 1000, 1500).await;
        let repo = db.daily_logs();

        // First save for the day
        let first = repo
            .upsert_batch(&[write(&pid, 50.0, 20.0, 45_000, 15_000)])
            .await
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sales_amount_paise, 45_000);

        // Second save fully replaces the first - no accumulation
        let second = repo
            .upsert_batch(&[write(&pid, 50.0, 40.0, 15_000, 5_000)])
            .await
            .unwrap();
        assert_eq!(second[0].sales_amount_paise, 15_000);
        assert_eq!(second[0].profit_paise, 5_000);

        // Same row identity survived the overwrite
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let db = test_db().await;
        let pid = seed_product(&db, "Parle-G", 1000, 1500).await;
        let repo = db.daily_logs();

        let records = vec![write(&pid, 50.0, 20.0, 45_000, 15_000)];
        let first = repo.upsert_batch(&records).await.unwrap();
        let second = repo.upsert_batch(&records).await.unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].opening_stock, second[0].opening_stock);
        assert_eq!(first[0].sales_amount_paise, second[0].sales_amount_paise);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_batch_rolls_back_as_a_unit() {
        let db = test_db().await;
        let pid = seed_product(&db, "Parle-G", 1000, 1500).await;
        let repo = db.daily_logs();

        // Second record references a product that doesn't exist, so the FK
        // fails and the whole batch must vanish - including the valid row.
        let result = repo
            .upsert_batch(&[
                write(&pid, 50.0, 20.0, 45_000, 15_000),
                write("no-such-product", 5.0, 0.0, 0, 0),
            ])
            .await;

        assert!(result.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_for_date_joins_product_fields() {
        let db = test_db().await;
        let pid = seed_product(&db, "Parle-G", 1000, 1500).await;
        let repo = db.daily_logs();

        repo.upsert_batch(&[write(&pid, 50.0, 20.0, 45_000, 15_000)])
            .await
            .unwrap();

        let rows = repo.for_date(day()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Parle-G");
        assert_eq!(rows[0].category.as_deref(), Some("General"));
        assert_eq!(rows[0].selling_price_paise, 1500);
        assert_eq!(rows[0].box_number.as_deref(), Some("B-1"));
        assert_eq!(rows[0].sold_qty(), 30.0);
    }

    #[tokio::test]
    async fn test_for_date_orders_by_product_name() {
        let db = test_db().await;
        let pid_b = seed_product(&db, "Biscuits", 500, 800).await;
        let pid_a = seed_product(&db, "Atta 5kg", 1000, 1500).await;
        let repo = db.daily_logs();

        repo.upsert_batch(&[
            write(&pid_b, 5.0, 0.0, 4000, 1500),
            write(&pid_a, 10.0, 5.0, 7500, 2500),
        ])
        .await
        .unwrap();

        let names: Vec<String> = repo
            .for_date(day())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.product_name)
            .collect();
        assert_eq!(names, vec!["Atta 5kg", "Biscuits"]);
    }

    #[tokio::test]
    async fn test_for_date_empty_is_not_an_error() {
        let db = test_db().await;
        let rows = db.daily_logs().for_date(day()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_summary_for_date() {
        let db = test_db().await;
        let pid_a = seed_product(&db, "Atta", 1000, 1500).await;
        let pid_b = seed_product(&db, "Biscuits", 500, 800).await;
        let repo = db.daily_logs();

        repo.upsert_batch(&[
            write(&pid_a, 50.0, 20.0, 45_000, 15_000),
            write(&pid_b, 10.0, 10.0, 0, 0),
        ])
        .await
        .unwrap();

        let summary = repo.summary_for_date(day()).await.unwrap();
        assert_eq!(summary.total_sales.paise(), 45_000);
        assert_eq!(summary.total_profit.paise(), 15_000);
    }

    #[tokio::test]
    async fn test_summary_empty_date_is_zero() {
        let db = test_db().await;
        let summary = db.daily_logs().summary_for_date(day()).await.unwrap();
        assert_eq!(summary, DaySummary::default());
    }

    #[tokio::test]
    async fn test_logs_scoped_to_their_date() {
        let db = test_db().await;
        let pid = seed_product(&db, "Atta", 1000, 1500).await;
        let repo = db.daily_logs();

        let mut other_day = write(&pid, 50.0, 20.0, 45_000, 15_000);
        other_day.date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        repo.upsert_batch(&[other_day]).await.unwrap();
        repo.upsert_batch(&[write(&pid, 20.0, 10.0, 15_000, 5_000)])
            .await
            .unwrap();

        // Two rows exist, one per date; each date only sees its own
        assert_eq!(repo.count().await.unwrap(), 2);
        let rows = repo.for_date(day()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales_amount_paise, 15_000);
    }

    #[tokio::test]
    async fn test_deleting_product_cascades_to_logs() {
        let db = test_db().await;
        let pid = seed_product(&db, "Doomed", 1000, 1500).await;

        db.daily_logs()
            .upsert_batch(&[write(&pid, 5.0, 0.0, 7500, 2500)])
            .await
            .unwrap();
        assert_eq!(db.daily_logs().count().await.unwrap(), 1);

        db.products().delete(&pid).await.unwrap();
        assert_eq!(db.daily_logs().count().await.unwrap(), 0);
    }
}
