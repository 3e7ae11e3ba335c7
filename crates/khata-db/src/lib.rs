//! # khata-db: Database Layer for the Daily Stock Khata
//!
//! This crate provides data access for the khata. It uses SQLite for
//! local storage with sqlx for async operations, and exposes the whole
//! backend behind the injectable [`store::StockStore`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Khata Data Flow                              │
//! │                                                                     │
//! │  Caller (UI shell, scripts)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                     khata-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌────────────────┐   │  │
//! │  │   │   service    │──►│  StockStore   │◄──│  MemoryStore   │   │  │
//! │  │   │ entry sheet, │   │   (trait)     │   │ (test double)  │   │  │
//! │  │   │ day report   │   └───────┬───────┘   └────────────────┘   │  │
//! │  │   └──────────────┘           │                                │  │
//! │  │                      ┌───────▼───────┐   ┌────────────────┐   │  │
//! │  │                      │  Database     │──►│  Repositories  │   │  │
//! │  │                      │  (pool.rs)    │   │ product,       │   │  │
//! │  │                      │  SqlitePool   │   │ daily_log      │   │  │
//! │  │                      └───────┬───────┘   └────────────────┘   │  │
//! │  └──────────────────────────────┼────────────────────────────────┘  │
//! │                                 ▼                                   │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                     SQLite Database (khata.db)                │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, daily_log)
//! - [`store`] - The StockStore trait, StoreError, and the in-memory fake
//! - [`service`] - Entry-sheet, catalog, and report flows
//!
//! ## Usage
//!
//! ```rust,ignore
//! use khata_db::{service, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/khata.db")).await?;
//!
//! // Morning: load the sheet, type counts, save
//! let sheet = service::load_entry_sheet(&db, service::business_today()).await?;
//! service::save_entry_sheet(&db, sheet.date, &entries).await?;
//!
//! // Evening: totals for the dashboard
//! let report = service::load_day_report(&db, sheet.date).await?;
//! println!("sales {} profit {}", report.summary.total_sales, report.summary.total_profit);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use service::{ServiceError, ServiceResult};
pub use store::{memory::MemoryStore, StockStore, StoreError, StoreResult};

// Repository re-exports for convenience
pub use repository::daily_log::DailyLogRepository;
pub use repository::product::ProductRepository;

// =============================================================================
// End-to-End Tests (SQLite-backed)
// =============================================================================
// The service module tests the flows over MemoryStore; these run the same
// flows over the real SQLite store so both StockStore implementations are
// covered.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::pool::{Database, DbConfig};
    use crate::service;
    use khata_core::{ProductInput, RawEntry};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn input(name: &str, cost: i64, selling: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: None,
            cost_price_paise: cost,
            selling_price_paise: selling,
            box_number: None,
        }
    }

    #[tokio::test]
    async fn test_full_day_over_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Catalog: ₹10 cost / ₹15 selling, plus a product never counted
        let atta = service::create_product(&db, &input("Atta", 1000, 1500))
            .await
            .unwrap();
        service::create_product(&db, &input("Biscuits", 500, 800))
            .await
            .unwrap();

        // Morning save, then the evening save refines it
        let mut entries = HashMap::new();
        entries.insert(atta.id.clone(), RawEntry::new("50", ""));
        service::save_entry_sheet(&db, day(), &entries).await.unwrap();

        entries.insert(atta.id.clone(), RawEntry::new("50", "20"));
        let stored = service::save_entry_sheet(&db, day(), &entries).await.unwrap();

        // One row per catalog product, last write wins
        assert_eq!(stored.len(), 2);

        let report = service::load_day_report(&db, day()).await.unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.summary.total_sales.paise(), 45_000);
        assert_eq!(report.summary.total_profit.paise(), 15_000);

        // The never-counted product saved as a zero row
        let biscuits_row = report
            .rows
            .iter()
            .find(|r| r.product_name == "Biscuits")
            .unwrap();
        assert_eq!(biscuits_row.opening_stock, 0.0);
        assert_eq!(biscuits_row.sales_amount_paise, 0);
    }

    #[tokio::test]
    async fn test_resave_over_sqlite_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let atta = service::create_product(&db, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut entries = HashMap::new();
        entries.insert(atta.id.clone(), RawEntry::new("50", "20"));

        let first = service::save_entry_sheet(&db, day(), &entries).await.unwrap();
        let second = service::save_entry_sheet(&db, day(), &entries).await.unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].sales_amount_paise, second[0].sales_amount_paise);

        let summary = service::load_day_report(&db, day()).await.unwrap().summary;
        assert_eq!(summary.total_sales.paise(), 45_000);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = service::create_product(&db, &input("", 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, service::ServiceError::Validation(_)));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
