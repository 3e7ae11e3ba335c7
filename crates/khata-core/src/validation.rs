//! # Validation Module
//!
//! Catalog input validation. The catalog has almost no invariants beyond
//! identity, so this stays small: a product needs a non-empty name and
//! non-negative prices, and labels must fit on printed sheets.
//!
//! Stock quantities are NOT validated here - they are coerced, not
//! validated (see [`crate::reconcile::parse_stock_qty`]).

use crate::error::{ValidationError, ValidationResult};
use crate::types::ProductInput;
use crate::{MAX_LABEL_LEN, MAX_NAME_LEN};

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use khata_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Parle-G 80g").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in paise. Zero is allowed; negative is not.
pub fn validate_price(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::NegativePrice {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an optional label (category, box number).
fn validate_label(field: &str, label: Option<&str>) -> ValidationResult<()> {
    if let Some(label) = label {
        if label.len() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_LABEL_LEN,
            });
        }
    }
    Ok(())
}

/// Validates a full set of editable product fields.
///
/// Called by the service layer before any create or update reaches the
/// store; repositories themselves stay dumb.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price("cost_price", input.cost_price_paise)?;
    validate_price("selling_price", input.selling_price_paise)?;
    validate_label("category", input.category.as_deref())?;
    validate_label("box_number", input.box_number.as_deref())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
