//! # Error Types
//!
//! Domain-specific error types for order-pricing.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError        - Rejected cart / discount operations             │
//! │  └── Validation      - wraps ValidationError                           │
//! │  ValidationError     - Input validation failures                       │
//! │                                                                         │
//! │  NOT an error: a cart line whose product is missing from the catalog.  │
//! │  Calculators skip such lines silently.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, code, etc.)
//! 3. A failed operation leaves the cart exactly as it was

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors returned by cart and discount operations.
///
/// Callers are expected to surface these as user-facing validation messages.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The discount code is not in the recognized set.
    ///
    /// Codes are matched exactly and case-sensitively. The previously active
    /// code (if any) stays active.
    #[error("Invalid discount code: {code}")]
    InvalidDiscountCode { code: String },

    /// The product's stock flag is false.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (in_stock: false)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: "p1" }
    ///      │
    ///      ▼
    /// UI shows: "Product p1 is out of stock"
    /// ```
    #[error("Product {product_id} is out of stock")]
    OutOfStock { product_id: String },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Resulting line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A rule table document could not be parsed.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
