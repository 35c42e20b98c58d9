//! # Calculators
//!
//! Each calculator is a rule table plus pure functions over explicit inputs.
//! None of them holds a cart, a customer, or a reference to another
//! calculator.
//!
//! ## Dependency Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   lines + catalog + tier                                                │
//! │            │                                                            │
//! │            ▼                                                            │
//! │      TierPricing::subtotal ──► TierPricing::tax                        │
//! │            │                                                            │
//! │            ├──────────────────┬─────────────────────┐                   │
//! │            ▼                  ▼                     ▼                   │
//! │   AppliedDiscount::amount  ShippingRates::cost  LoyaltyProgram::points  │
//! │                                                                         │
//! │   Every consumer receives the SAME subtotal value.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod discount;
pub mod loyalty;
pub mod pricing;
pub mod shipping;

pub use discount::{discount_for, AppliedDiscount, DiscountCodes};
pub use loyalty::LoyaltyProgram;
pub use pricing::TierPricing;
pub use shipping::ShippingRates;
