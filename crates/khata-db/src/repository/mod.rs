//! # Repository Module
//!
//! Database repository implementations for the khata.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API.                                                               │
//! │                                                                     │
//! │  Service flow                                                       │
//! │       │                                                             │
//! │       │  db.daily_logs().upsert_batch(&records)                     │
//! │       ▼                                                             │
//! │  DailyLogRepository                                                 │
//! │  ├── for_date(&self, date)                                          │
//! │  ├── upsert_batch(&self, records)                                   │
//! │  └── summary_for_date(&self, date)                                  │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Repositories stay dumb; rules live in khata-core                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product catalog CRUD
//! - [`daily_log::DailyLogRepository`] - Daily log reads, batch upsert,
//!   summary aggregation

pub mod daily_log;
pub mod product;
