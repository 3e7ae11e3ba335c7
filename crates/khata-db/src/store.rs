//! # Stock Store
//!
//! The injected data-access dependency. Everything above the database
//! talks to this trait, never to a module-level connection:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     StockStore Boundary                             │
//! │                                                                     │
//! │  service flows ──────────► StockStore (trait)                       │
//! │                                  │                                  │
//! │                  ┌───────────────┴───────────────┐                  │
//! │                  ▼                               ▼                  │
//! │            Database (SQLite)              MemoryStore (HashMap)     │
//! │            production                     tests / substitution      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait carries exactly the backend operations the khata needs:
//! catalog CRUD, the date-scoped log read, the batch upsert, and the
//! summary aggregation. Failures collapse into a single message-carrying
//! signal - the interactive caller surfaces them and keeps the user's
//! input for retry; it never needs to dispatch on an error code.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::error::DbError;
use crate::pool::Database;
use khata_core::{DailyLog, DailyLogWithProduct, DailyLogWrite, DaySummary, Product, ProductInput};

pub mod memory;

// =============================================================================
// Store Error
// =============================================================================

/// A store operation failure.
///
/// Deliberately coarse: beyond "the target row doesn't exist", callers
/// only ever learn "it failed" plus a message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed entity doesn't exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Anything else: constraint violation, connectivity, backend error.
    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StoreError::NotFound { entity, id },
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// The Trait
// =============================================================================

/// Data-access operations for the khata, as an injectable dependency.
///
/// Implemented by [`Database`] (SQLite) for production and
/// [`memory::MemoryStore`] as an in-memory fake.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Lists the product catalog, ordered by name ascending.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Creates a product from its editable fields.
    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product>;

    /// Replaces a product's editable fields.
    async fn update_product(&self, id: &str, input: &ProductInput) -> StoreResult<Product>;

    /// Deletes a product (and, with it, its daily logs).
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    /// All logs for a date, joined with product display fields, ordered
    /// by product name.
    async fn logs_for_date(&self, date: NaiveDate) -> StoreResult<Vec<DailyLogWithProduct>>;

    /// Writes a whole day's batch atomically; conflict key is
    /// (product_id, date), conflicting rows are overwritten wholesale.
    async fn upsert_logs(&self, records: &[DailyLogWrite]) -> StoreResult<Vec<DailyLog>>;

    /// Total sales and profit across a date's logs.
    async fn summary_for_date(&self, date: NaiveDate) -> StoreResult<DaySummary>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

#[async_trait]
impl StockStore for Database {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products().list().await?)
    }

    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product> {
        Ok(self.products().create(input).await?)
    }

    async fn update_product(&self, id: &str, input: &ProductInput) -> StoreResult<Product> {
        Ok(self.products().update(id, input).await?)
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        Ok(self.products().delete(id).await?)
    }

    async fn logs_for_date(&self, date: NaiveDate) -> StoreResult<Vec<DailyLogWithProduct>> {
        Ok(self.daily_logs().for_date(date).await?)
    }

    async fn upsert_logs(&self, records: &[DailyLogWrite]) -> StoreResult<Vec<DailyLog>> {
        Ok(self.daily_logs().upsert_batch(records).await?)
    }

    async fn summary_for_date(&self, date: NaiveDate) -> StoreResult<DaySummary> {
        Ok(self.daily_logs().summary_for_date(date).await?)
    }
}
