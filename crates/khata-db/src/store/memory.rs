//! # In-Memory Store
//!
//! A HashMap-backed [`StockStore`] with the same observable behavior as
//! the SQLite store: name-ascending listings, (product_id, date)
//! overwrite-on-conflict, cascade on product delete, zero summaries for
//! empty dates. Useful anywhere a test (or a caller) wants the store
//! semantics without a database in the loop.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::store::{StockStore, StoreError, StoreResult};
use khata_core::{
    DailyLog, DailyLogWithProduct, DailyLogWrite, DaySummary, Money, Product, ProductInput,
};

#[derive(Debug, Default)]
struct MemoryInner {
    products: HashMap<String, Product>,
    // Keyed by the same pair the SQLite uniqueness constraint enforces.
    logs: HashMap<(String, NaiveDate), DailyLog>,
}

/// In-memory [`StockStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // Recover the data on poison; a panicked test thread shouldn't
        // wedge every other store call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let inner = self.lock();
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category: input.category.clone(),
            cost_price_paise: input.cost_price_paise,
            selling_price_paise: input.selling_price_paise,
            box_number: input.box_number.clone(),
            created_at: now,
            updated_at: now,
        };

        self.lock()
            .products
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, input: &ProductInput) -> StoreResult<Product> {
        let mut inner = self.lock();
        let product = inner
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.name = input.name.trim().to_string();
        product.category = input.category.clone();
        product.cost_price_paise = input.cost_price_paise;
        product.selling_price_paise = input.selling_price_paise;
        product.box_number = input.box_number.clone();
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.products.remove(id).is_none() {
            return Err(StoreError::not_found("Product", id));
        }
        // Cascade, matching the SQLite schema
        inner.logs.retain(|(product_id, _), _| product_id != id);
        Ok(())
    }

    async fn logs_for_date(&self, date: NaiveDate) -> StoreResult<Vec<DailyLogWithProduct>> {
        let inner = self.lock();
        let mut rows: Vec<DailyLogWithProduct> = inner
            .logs
            .values()
            .filter(|log| log.date == date)
            // Inner join: logs whose product is gone are invisible
            .filter_map(|log| {
                inner.products.get(&log.product_id).map(|product| {
                    DailyLogWithProduct {
                        id: log.id.clone(),
                        product_id: log.product_id.clone(),
                        date: log.date,
                        opening_stock: log.opening_stock,
                        remaining_stock: log.remaining_stock,
                        sales_amount_paise: log.sales_amount_paise,
                        profit_paise: log.profit_paise,
                        product_name: product.name.clone(),
                        category: product.category.clone(),
                        cost_price_paise: product.cost_price_paise,
                        selling_price_paise: product.selling_price_paise,
                        box_number: product.box_number.clone(),
                    }
                })
            })
            .collect();
        rows.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(rows)
    }

    async fn upsert_logs(&self, records: &[DailyLogWrite]) -> StoreResult<Vec<DailyLog>> {
        let mut inner = self.lock();

        // All-or-nothing: validate the whole batch before touching state,
        // mirroring the SQLite transaction's FK check.
        for record in records {
            if !inner.products.contains_key(&record.product_id) {
                return Err(StoreError::Backend(format!(
                    "foreign key violation: product {} does not exist",
                    record.product_id
                )));
            }
        }

        let now = Utc::now();
        let mut stored = Vec::with_capacity(records.len());

        for record in records {
            let key = (record.product_id.clone(), record.date);
            let log = match inner.logs.get(&key) {
                // Overwrite wholesale; identity and created_at survive
                Some(existing) => DailyLog {
                    id: existing.id.clone(),
                    product_id: record.product_id.clone(),
                    date: record.date,
                    opening_stock: record.opening_stock,
                    remaining_stock: record.remaining_stock,
                    sales_amount_paise: record.sales_amount_paise,
                    profit_paise: record.profit_paise,
                    created_at: existing.created_at,
                    updated_at: now,
                },
                None => DailyLog {
                    id: Uuid::new_v4().to_string(),
                    product_id: record.product_id.clone(),
                    date: record.date,
                    opening_stock: record.opening_stock,
                    remaining_stock: record.remaining_stock,
                    sales_amount_paise: record.sales_amount_paise,
                    profit_paise: record.profit_paise,
                    created_at: now,
                    updated_at: now,
                },
            };
            inner.logs.insert(key, log.clone());
            stored.push(log);
        }

        Ok(stored)
    }

    async fn summary_for_date(&self, date: NaiveDate) -> StoreResult<DaySummary> {
        let inner = self.lock();
        let summary = inner
            .logs
            .values()
            .filter(|log| log.date == date)
            .fold(DaySummary::default(), |acc, log| DaySummary {
                total_sales: acc.total_sales + Money::from_paise(log.sales_amount_paise),
                total_profit: acc.total_profit + Money::from_paise(log.profit_paise),
            });
        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// These mirror the SQLite repository tests: both implementations must
// exhibit the same observable store behavior.

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: None,
            cost_price_paise: 1000,
            selling_price_paise: 1500,
            box_number: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn write(product_id: &str, opening: f64, remaining: f64) -> DailyLogWrite {
        DailyLogWrite {
            product_id: product_id.to_string(),
            date: day(),
            opening_stock: opening,
            remaining_stock: remaining,
            sales_amount_paise: ((opening - remaining).max(0.0) * 1500.0) as i64,
            profit_paise: ((opening - remaining).max(0.0) * 500.0) as i64,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let store = MemoryStore::new();
        store.create_product(&input("Chai")).await.unwrap();
        store.create_product(&input("Atta")).await.unwrap();

        let names: Vec<String> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Atta", "Chai"]);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update_product("ghost", &input("X")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_and_keeps_identity() {
        let store = MemoryStore::new();
        let product = store.create_product(&input("Atta")).await.unwrap();

        let first = store
            .upsert_logs(&[write(&product.id, 50.0, 20.0)])
            .await
            .unwrap();
        let second = store
            .upsert_logs(&[write(&product.id, 50.0, 40.0)])
            .await
            .unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second[0].remaining_stock, 40.0);
        assert_eq!(store.logs_for_date(day()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_unknown_product_rejects_whole_batch() {
        let store = MemoryStore::new();
        let product = store.create_product(&input("Atta")).await.unwrap();

        let result = store
            .upsert_logs(&[write(&product.id, 50.0, 20.0), write("ghost", 5.0, 0.0)])
            .await;

        assert!(result.is_err());
        // Nothing persisted, including the valid record
        assert!(store.logs_for_date(day()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_logs() {
        let store = MemoryStore::new();
        let product = store.create_product(&input("Atta")).await.unwrap();
        store
            .upsert_logs(&[write(&product.id, 10.0, 5.0)])
            .await
            .unwrap();

        store.delete_product(&product.id).await.unwrap();

        assert!(store.logs_for_date(day()).await.unwrap().is_empty());
        let summary = store.summary_for_date(day()).await.unwrap();
        assert_eq!(summary, DaySummary::default());
    }

    #[tokio::test]
    async fn test_summary_sums_the_date() {
        let store = MemoryStore::new();
        let a = store.create_product(&input("Atta")).await.unwrap();
        let b = store.create_product(&input("Biscuits")).await.unwrap();
        store
            .upsert_logs(&[write(&a.id, 50.0, 20.0), write(&b.id, 10.0, 10.0)])
            .await
            .unwrap();

        let summary = store.summary_for_date(day()).await.unwrap();
        assert_eq!(summary.total_sales.paise(), 45_000);
        assert_eq!(summary.total_profit.paise(), 15_000);
    }
}
