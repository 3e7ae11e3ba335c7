//! # Reconciliation Module
//!
//! The daily stock-to-sales-and-profit derivation. This is the one piece
//! of real computation in the system, so it lives here as pure functions.
//!
//! ## The Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 One product, one day                                │
//! │                                                                     │
//! │  raw "opening" ──► parse_stock_qty ──► opening (f64, ≥ 0)           │
//! │  raw "remaining" ─► parse_stock_qty ─► remaining (f64, ≥ 0)         │
//! │                                                                     │
//! │  sold         = max(0, opening − remaining)                         │
//! │  sales_amount = sold × selling_price                                │
//! │  profit       = sold × (selling_price − cost_price)                 │
//! │                                                                     │
//! │  → DailyLogWrite { product_id, date, counts, amounts }              │
//! │    (no row id: (product_id, date) is the identity)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Total over the declared input domain: garbage input coerces to 0,
//!   never to an error
//! - Exactly one write record per catalog product, whether or not the
//!   product has an entry or a prior row for the date
//! - `sold ≥ 0` always: a remaining count above the opening count (a
//!   restock or a correction) floors to zero sales
//! - profit may be negative when cost exceeds selling price, surfaced
//!   as-is

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{DailyLog, DailyLogWrite, DaySummary, Product};

// =============================================================================
// Input Coercion
// =============================================================================

/// Raw, as-typed opening/remaining quantities for one product.
///
/// Both fields hold whatever the operator typed, including the empty
/// string. Coercion to numbers happens inside the derivation, never at
/// the edge, so a half-filled sheet is always saveable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub opening_stock: String,
    pub remaining_stock: String,
}

impl RawEntry {
    /// Convenience constructor for tests and callers with owned strings.
    pub fn new(opening: impl Into<String>, remaining: impl Into<String>) -> Self {
        RawEntry {
            opening_stock: opening.into(),
            remaining_stock: remaining.into(),
        }
    }
}

/// Coerces a raw quantity string to a non-negative count.
///
/// Missing, empty, unparsable, or non-finite input is exactly `0`, never
/// an error. Negative input clamps to `0`: stock counts are declared
/// non-negative, so the coercion boundary enforces it.
///
/// ## Example
/// ```rust
/// use khata_core::reconcile::parse_stock_qty;
///
/// assert_eq!(parse_stock_qty("50"), 50.0);
/// assert_eq!(parse_stock_qty(" 2.5 "), 2.5);
/// assert_eq!(parse_stock_qty(""), 0.0);
/// assert_eq!(parse_stock_qty("abc"), 0.0);
/// assert_eq!(parse_stock_qty("-3"), 0.0);
/// ```
pub fn parse_stock_qty(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite())
        .map(|q| q.max(0.0))
        .unwrap_or(0.0)
}

// =============================================================================
// Per-Line Derivation
// =============================================================================

/// The derived figures for one product line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDerivation {
    /// max(0, opening − remaining).
    pub sold_qty: f64,
    /// sold × selling price.
    pub sales_amount: Money,
    /// sold × (selling − cost). Negative when cost exceeds selling price.
    pub profit: Money,
}

/// Derives sold quantity, sales amount, and profit from two counts.
///
/// The floor at zero is deliberate: remaining above opening means a
/// restock or a data-entry correction, not negative sales, and it is not
/// a validation error.
///
/// ## Example
/// ```rust
/// use khata_core::money::Money;
/// use khata_core::reconcile::derive_line;
///
/// let line = derive_line(50.0, 20.0, Money::from_paise(1500), Money::from_paise(1000));
/// assert_eq!(line.sold_qty, 30.0);
/// assert_eq!(line.sales_amount.paise(), 45_000);
/// assert_eq!(line.profit.paise(), 15_000);
/// ```
pub fn derive_line(
    opening: f64,
    remaining: f64,
    selling_price: Money,
    cost_price: Money,
) -> LineDerivation {
    let sold_qty = (opening - remaining).max(0.0);

    LineDerivation {
        sold_qty,
        sales_amount: selling_price.times_qty(sold_qty),
        profit: (selling_price - cost_price).times_qty(sold_qty),
    }
}

// =============================================================================
// Whole-Day Reconciliation
// =============================================================================

/// Builds the full day's batch of write records from the catalog and the
/// operator's raw entries.
///
/// Emits exactly one [`DailyLogWrite`] per product in `products`, in the
/// same order. A product with no entry in the map gets a 0/0 record, which
/// on save overwrites any earlier figures for the date with zeros - a full
/// save is a full statement of the day, not a patch.
///
/// Pure and total: no I/O, no errors. Persistence is the store's problem.
pub fn reconcile_day(
    products: &[Product],
    entries: &HashMap<String, RawEntry>,
    date: NaiveDate,
) -> Vec<DailyLogWrite> {
    static EMPTY: RawEntry = RawEntry {
        opening_stock: String::new(),
        remaining_stock: String::new(),
    };

    products
        .iter()
        .map(|product| {
            let entry = entries.get(&product.id).unwrap_or(&EMPTY);
            let opening = parse_stock_qty(&entry.opening_stock);
            let remaining = parse_stock_qty(&entry.remaining_stock);

            let line = derive_line(
                opening,
                remaining,
                product.selling_price(),
                product.cost_price(),
            );

            DailyLogWrite {
                product_id: product.id.clone(),
                date,
                opening_stock: opening,
                remaining_stock: remaining,
                sales_amount_paise: line.sales_amount.paise(),
                profit_paise: line.profit.paise(),
            }
        })
        .collect()
}

// =============================================================================
// Summary Fold
// =============================================================================

/// Sums sales and profit across a date's logs.
///
/// A simple fold; rows are already null-coalesced to zero by the time they
/// exist as [`DailyLog`] values.
pub fn summarize_day<'a, I>(logs: I) -> DaySummary
where
    I: IntoIterator<Item = &'a DailyLog>,
{
    logs.into_iter().fold(DaySummary::default(), |acc, log| {
        DaySummary {
            total_sales: acc.total_sales + log.sales_amount(),
            total_profit: acc.total_profit + log.profit(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
