//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  khata-core errors (this file)                                      │
//! │  └── ValidationError  - Catalog input failures                      │
//! │                                                                     │
//! │  khata-db errors (separate crate)                                   │
//! │  ├── DbError          - Database operation failures                 │
//! │  ├── StoreError       - Single-signal failures at the store trait   │
//! │  └── ServiceError     - Validation OR store, at the flow layer      │
//! │                                                                     │
//! │  Flow: ValidationError ─► ServiceError ◄─ StoreError ◄─ DbError     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is deliberately NOT an error: malformed numeric entry on the
//! stock sheet. Quantity coercion is validation-free - garbage becomes 0
//! inside the derivation, so there is no error type for it.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog input validation errors.
///
/// These occur when product fields don't meet requirements. Used for
/// early validation before the store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A price was negative.
    #[error("{field} must not be negative")]
    NegativePrice { field: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");

        let err = ValidationError::NegativePrice {
            field: "cost_price".to_string(),
        };
        assert_eq!(err.to_string(), "cost_price must not be negative");
    }
}
