//! # Validation Module
//!
//! Input validation for cart operations and rule tables.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host (storefront / POS UI)                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product ids, quantities, product records                          │
//! │  └── Rule tables (rates, fees, loyalty parameters)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / discount operations                                   │
//! │  └── Stock flag, code lookup, size limits                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_pricing::validation::{validate_product_id, validate_quantity};
//!
//! assert!(validate_product_id("p1").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Weight};
use crate::types::{Product, Rate};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product id accepted into a cart.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

// =============================================================================
// Cart Input Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_PRODUCT_ID_LEN`] characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity being added to a cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// `update_quantity` does not use this: a quantity ≤ 0 there means "remove".
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product record before it enters a cart.
///
/// ## Rules
/// - Valid product id
/// - Price and weight are non-negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_non_negative_money("price", product.price)?;
    validate_weight(product.weight)?;

    Ok(())
}

// =============================================================================
// Rule Table Validators
// =============================================================================

/// Validates a rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > Rate::FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Rate::FULL_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a fee or threshold amount.
pub fn validate_non_negative_money(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a rule parameter is at least `min`.
pub fn validate_at_least(field: &str, value: i64, min: i64) -> ValidationResult<()> {
    if value < min {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a unit weight.
pub fn validate_weight(weight: Weight) -> ValidationResult<()> {
    if weight.is_negative() {
        return Err(ValidationError::Negative {
            field: "weight".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
