//! # khata-core: Pure Business Logic for the Daily Stock Khata
//!
//! This crate is the **heart** of the khata. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Khata Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Caller (UI shell, scripts)                    │  │
//! │  │   entry sheet ──► save all ──► day report                     │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │               ★ khata-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │  │
//! │  │   │   types   │  │   money   │  │ reconcile │  │ validation│  │  │
//! │  │   │  Product  │  │   Money   │  │ derive +  │  │   rules   │  │  │
//! │  │   │  DailyLog │  │  (paise)  │  │ summarize │  │   checks  │  │  │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                    khata-db (Database Layer)                  │  │
//! │  │          SQLite queries, migrations, StockStore trait         │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DailyLog, DaySummary, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reconcile`] - The stock-to-sales-and-profit derivation
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::money::Money;
//! use khata_core::reconcile::derive_line;
//!
//! // Prices in paise, never floats
//! let selling = Money::from_paise(1500); // ₹15.00
//! let cost = Money::from_paise(1000);    // ₹10.00
//!
//! // Opening 50, remaining 20 → 30 sold
//! let line = derive_line(50.0, 20.0, selling, cost);
//! assert_eq!(line.sold_qty, 30.0);
//! assert_eq!(line.sales_amount.paise(), 45_000); // ₹450
//! assert_eq!(line.profit.paise(), 15_000);       // ₹150
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use khata_core::Money` instead of
// `use khata_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use reconcile::{derive_line, parse_stock_qty, reconcile_day, summarize_day, RawEntry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
///
/// ## Business Reason
/// Keeps labels printable on entry sheets and report rows.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a category or box-number label.
pub const MAX_LABEL_LEN: usize = 50;
