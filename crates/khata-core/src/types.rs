//! # Domain Types
//!
//! Core domain types used throughout the khata.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐   │
//! │  │    Product      │   │    DailyLog     │   │  DailyLogWrite   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id      │   │
//! │  │  name           │   │  product_id     │   │  date            │   │
//! │  │  prices (paise) │   │  date           │   │  counts+amounts  │   │
//! │  │  box_number     │   │  counts+amounts │   │  (NO id field)   │   │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────┘   │
//! │                                                                     │
//! │  At most ONE DailyLog per (product_id, date). A DailyLogWrite       │
//! │  carries no identity: the (product_id, date) pair IS the identity,  │
//! │  and the store's uniqueness constraint resolves insert vs update.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop's catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the entry sheet and reports.
    pub name: String,

    /// Optional grouping label ("Cold Drinks", "Biscuits", ...).
    pub category: Option<String>,

    /// Purchase cost in paise.
    pub cost_price_paise: i64,

    /// Selling price in paise.
    pub selling_price_paise: i64,

    /// Physical storage-bin label. Display-only.
    pub box_number: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the cost price as a Money type.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_paise(self.cost_price_paise)
    }

    /// Returns the selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// Per-unit margin. Negative when the product sells below cost.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.selling_price() - self.cost_price()
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// Editable product fields, used for both create and update.
///
/// The id and timestamps are owned by the store; callers only ever
/// submit these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category: Option<String>,
    pub cost_price_paise: i64,
    pub selling_price_paise: i64,
    pub box_number: Option<String>,
}

// =============================================================================
// Daily Log
// =============================================================================

/// One day's stock record for one product.
///
/// Invariant: at most one row per (product_id, date), enforced by the
/// store's uniqueness constraint. Every save for the same day overwrites
/// the numeric fields wholesale; there is no edit history within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyLog {
    /// Surrogate row id (UUID v4), assigned by the store.
    pub id: String,

    /// The product this row belongs to.
    pub product_id: String,

    /// Local calendar date, no timezone semantics.
    pub date: NaiveDate,

    /// Morning count.
    pub opening_stock: f64,

    /// Evening count.
    pub remaining_stock: f64,

    /// Derived: sold × selling price, in paise.
    pub sales_amount_paise: i64,

    /// Derived: sold × (selling − cost), in paise. May be negative.
    pub profit_paise: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    /// Sold quantity, recomputed from the two counts.
    ///
    /// Not stored: the row keeps only the counts and the two money
    /// amounts. Floored at zero, so a restock during the day never
    /// produces negative sales.
    #[inline]
    pub fn sold_qty(&self) -> f64 {
        (self.opening_stock - self.remaining_stock).max(0.0)
    }

    /// Returns the sales amount as Money.
    #[inline]
    pub fn sales_amount(&self) -> Money {
        Money::from_paise(self.sales_amount_paise)
    }

    /// Returns the profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_paise(self.profit_paise)
    }
}

// =============================================================================
// Daily Log Write Record
// =============================================================================

/// An identity-free write record for one product on one date.
///
/// Deliberately carries **no row id**: the (product_id, date) pair is the
/// conflict-resolution key, and the store decides whether the record
/// inserts a new row or overwrites an existing one. This is what makes a
/// whole-day save idempotent and last-write-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogWrite {
    pub product_id: String,
    pub date: NaiveDate,
    pub opening_stock: f64,
    pub remaining_stock: f64,
    pub sales_amount_paise: i64,
    pub profit_paise: i64,
}

// =============================================================================
// Daily Log + Product Join Row
// =============================================================================

/// A daily log joined with its product's display fields.
///
/// This is the read-side shape for the dashboard and history views: every
/// row a viewer sees carries the product name, prices, and box label
/// alongside the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyLogWithProduct {
    pub id: String,
    pub product_id: String,
    pub date: NaiveDate,
    pub opening_stock: f64,
    pub remaining_stock: f64,
    pub sales_amount_paise: i64,
    pub profit_paise: i64,

    // Joined product fields
    pub product_name: String,
    pub category: Option<String>,
    pub cost_price_paise: i64,
    pub selling_price_paise: i64,
    pub box_number: Option<String>,
}

impl DailyLogWithProduct {
    /// Sold quantity, recomputed from the counts (see [`DailyLog::sold_qty`]).
    #[inline]
    pub fn sold_qty(&self) -> f64 {
        (self.opening_stock - self.remaining_stock).max(0.0)
    }

    #[inline]
    pub fn sales_amount(&self) -> Money {
        Money::from_paise(self.sales_amount_paise)
    }

    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_paise(self.profit_paise)
    }

    /// The evening count hit zero: nothing left on the shelf.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.remaining_stock == 0.0
    }
}

// =============================================================================
// Day Summary
// =============================================================================

/// Totals across all of a date's logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub total_sales: Money,
    pub total_profit: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
