//! # Service Flows
//!
//! The screen-level flows of the khata, written against the injected
//! [`StockStore`] so they run unchanged over SQLite or the in-memory
//! store.
//!
//! ## The Stock-Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      One Business Day                               │
//! │                                                                     │
//! │  Morning:  load_entry_sheet(today)                                  │
//! │            → one row per product, yesterday's blanks, any counts    │
//! │              already saved today pre-filled                         │
//! │            operator types opening counts                            │
//! │                                                                     │
//! │  Evening:  operator types remaining counts                          │
//! │            save_entry_sheet(today, raw entries)                     │
//! │            → reconcile_day → one atomic batch upsert                │
//! │                                                                     │
//! │  Any time: load_day_report(date)                                    │
//! │            → joined rows + totals for dashboard / history / print   │
//! │                                                                     │
//! │  A failed save persists NOTHING; the caller keeps the raw entries   │
//! │  in hand and retries explicitly. No background retry exists.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::store::{StockStore, StoreError};
use khata_core::validation::validate_product_input;
use khata_core::{
    reconcile_day, DailyLog, DailyLogWithProduct, DaySummary, Product, ProductInput, RawEntry,
    ValidationError,
};

// =============================================================================
// Service Error
// =============================================================================

/// A service flow failure: either the input never made it past
/// validation, or the store call failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for service flows.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Dates
// =============================================================================

/// The current business date: the local calendar day, no timezone
/// gymnastics beyond that.
pub fn business_today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Catalog Flows
// =============================================================================

/// Creates a catalog product after validating its fields.
pub async fn create_product<S>(store: &S, input: &ProductInput) -> ServiceResult<Product>
where
    S: StockStore + ?Sized,
{
    validate_product_input(input)?;
    let product = store.create_product(input).await?;
    info!(id = %product.id, name = %product.name, "Product created");
    Ok(product)
}

/// Replaces a product's editable fields after validating them.
pub async fn update_product<S>(store: &S, id: &str, input: &ProductInput) -> ServiceResult<Product>
where
    S: StockStore + ?Sized,
{
    validate_product_input(input)?;
    let product = store.update_product(id, input).await?;
    info!(id = %product.id, "Product updated");
    Ok(product)
}

/// Deletes a catalog product.
pub async fn delete_product<S>(store: &S, id: &str) -> ServiceResult<()>
where
    S: StockStore + ?Sized,
{
    store.delete_product(id).await?;
    info!(id = %id, "Product deleted");
    Ok(())
}

// =============================================================================
// Entry Sheet
// =============================================================================

/// One entry-sheet row: a product plus any counts already saved today.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub product: Product,
    /// Morning count, if a log already exists for the date.
    pub opening_stock: Option<f64>,
    /// Evening count, if a log already exists for the date.
    pub remaining_stock: Option<f64>,
}

/// The full entry sheet for a date: one row per catalog product, in
/// catalog (name) order.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySheet {
    pub date: NaiveDate,
    pub rows: Vec<EntryRow>,
}

/// Loads the entry sheet for a date.
///
/// Products with a saved log get their counts pre-filled so a later save
/// can refine rather than retype; products without one get blanks. An
/// empty catalog is an empty sheet, not an error.
pub async fn load_entry_sheet<S>(store: &S, date: NaiveDate) -> ServiceResult<EntrySheet>
where
    S: StockStore + ?Sized,
{
    let products = store.list_products().await?;
    let existing = store.logs_for_date(date).await?;

    let by_product: HashMap<&str, &DailyLogWithProduct> = existing
        .iter()
        .map(|log| (log.product_id.as_str(), log))
        .collect();

    let rows = products
        .into_iter()
        .map(|product| {
            let found = by_product.get(product.id.as_str());
            EntryRow {
                opening_stock: found.map(|log| log.opening_stock),
                remaining_stock: found.map(|log| log.remaining_stock),
                product,
            }
        })
        .collect();

    Ok(EntrySheet { date, rows })
}

/// Saves a day's raw entries: derive, then write the whole batch at once.
///
/// One record per catalog product goes to the store in a single upsert
/// call - products the operator skipped get zero records, so the save is
/// a complete statement of the day. On failure nothing is persisted; the
/// caller's `entries` map is untouched and can be resubmitted as-is.
///
/// Saving the same entries twice leaves the store in the same state
/// (idempotent); saving different entries replaces the earlier figures
/// wholesale (last-write-wins).
pub async fn save_entry_sheet<S>(
    store: &S,
    date: NaiveDate,
    entries: &HashMap<String, RawEntry>,
) -> ServiceResult<Vec<DailyLog>>
where
    S: StockStore + ?Sized,
{
    let products = store.list_products().await?;
    let records = reconcile_day(&products, entries, date);

    debug!(date = %date, records = records.len(), "Saving entry sheet");
    let stored = store.upsert_logs(&records).await?;
    info!(date = %date, rows = stored.len(), "Entry sheet saved");

    Ok(stored)
}

// =============================================================================
// Day Report
// =============================================================================

/// A date's report: the joined rows plus the day's totals.
///
/// Backs the dashboard (today) and the history view (any date); rows
/// flag themselves out-of-stock via
/// [`DailyLogWithProduct::is_out_of_stock`].
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub rows: Vec<DailyLogWithProduct>,
    pub summary: DaySummary,
}

/// Loads the report for a date. A date with no logs yields empty rows
/// and a zero summary.
pub async fn load_day_report<S>(store: &S, date: NaiveDate) -> ServiceResult<DayReport>
where
    S: StockStore + ?Sized,
{
    let rows = store.logs_for_date(date).await?;
    let summary = store.summary_for_date(date).await?;

    Ok(DayReport {
        date,
        rows,
        summary,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
// Service flows run against MemoryStore here; the end-to-end SQLite runs
// live in lib.rs so both StockStore implementations get exercised.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn input(name: &str, cost: i64, selling: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: None,
            cost_price_paise: cost,
            selling_price_paise: selling,
            box_number: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[tokio::test]
    async fn test_create_product_validates_first() {
        let store = MemoryStore::new();
        let err = create_product(&store, &input("   ", 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_product_validates_first() {
        let store = MemoryStore::new();
        let product = create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut bad = input("Atta", 1000, 1500);
        bad.selling_price_paise = -1;
        let err = update_product(&store, &product.id, &bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_entry_sheet_blank_then_prefilled() {
        let store = MemoryStore::new();
        create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();
        create_product(&store, &input("Biscuits", 500, 800))
            .await
            .unwrap();

        // Fresh day: one blank row per product, name order
        let sheet = load_entry_sheet(&store, day()).await.unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].product.name, "Atta");
        assert!(sheet.rows[0].opening_stock.is_none());

        // Save morning counts for one product only
        let mut entries = HashMap::new();
        entries.insert(
            sheet.rows[0].product.id.clone(),
            RawEntry::new("50", ""),
        );
        save_entry_sheet(&store, day(), &entries).await.unwrap();

        // Reload: saved counts come back pre-filled, the skipped product
        // shows the zero record its save produced
        let sheet = load_entry_sheet(&store, day()).await.unwrap();
        assert_eq!(sheet.rows[0].opening_stock, Some(50.0));
        assert_eq!(sheet.rows[0].remaining_stock, Some(0.0));
        assert_eq!(sheet.rows[1].opening_stock, Some(0.0));
    }

    #[tokio::test]
    async fn test_save_twice_is_idempotent() {
        let store = MemoryStore::new();
        let product = create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut entries = HashMap::new();
        entries.insert(product.id.clone(), RawEntry::new("50", "20"));

        let first = save_entry_sheet(&store, day(), &entries).await.unwrap();
        let second = save_entry_sheet(&store, day(), &entries).await.unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].sales_amount_paise, second[0].sales_amount_paise);
        assert_eq!(second[0].sales_amount_paise, 45_000);
    }

    #[tokio::test]
    async fn test_second_save_wins_wholesale() {
        let store = MemoryStore::new();
        let product = create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut morning = HashMap::new();
        morning.insert(product.id.clone(), RawEntry::new("50", ""));
        save_entry_sheet(&store, day(), &morning).await.unwrap();

        let mut evening = HashMap::new();
        evening.insert(product.id.clone(), RawEntry::new("50", "20"));
        save_entry_sheet(&store, day(), &evening).await.unwrap();

        // Stored state equals the second save alone
        let report = load_day_report(&store, day()).await.unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].remaining_stock, 20.0);
        assert_eq!(report.summary.total_sales.paise(), 45_000);
        assert_eq!(report.summary.total_profit.paise(), 15_000);
    }

    #[tokio::test]
    async fn test_garbage_entries_save_as_zeros() {
        let store = MemoryStore::new();
        let product = create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut entries = HashMap::new();
        entries.insert(product.id.clone(), RawEntry::new("abc", " "));
        let stored = save_entry_sheet(&store, day(), &entries).await.unwrap();

        assert_eq!(stored[0].opening_stock, 0.0);
        assert_eq!(stored[0].remaining_stock, 0.0);
        assert_eq!(stored[0].sales_amount_paise, 0);
    }

    #[tokio::test]
    async fn test_empty_catalog_report_is_empty() {
        let store = MemoryStore::new();
        let report = load_day_report(&store, day()).await.unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.summary, DaySummary::default());
    }

    #[tokio::test]
    async fn test_report_flags_out_of_stock() {
        let store = MemoryStore::new();
        let product = create_product(&store, &input("Atta", 1000, 1500))
            .await
            .unwrap();

        let mut entries = HashMap::new();
        entries.insert(product.id.clone(), RawEntry::new("10", "0"));
        save_entry_sheet(&store, day(), &entries).await.unwrap();

        let report = load_day_report(&store, day()).await.unwrap();
        assert!(report.rows[0].is_out_of_stock());
    }
}
