//! # order-pricing: Pure Pricing Engine
//!
//! Given a customer's tier and a cart of line items, this crate derives
//! subtotal, tax, discount, shipping cost, loyalty points and the final total
//! through a chain of small, independent calculators. It has zero I/O
//! dependencies.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      order-pricing (THIS CRATE)                         │
//! │                                                                         │
//! │   ┌─────────────────────────────────────────────────────────────────┐   │
//! │   │  checkout::ShoppingCart  (facade: cart + customer + code)       │   │
//! │   └───────────────┬─────────────────────────────────────────────────┘   │
//! │                   │ lines, catalog, tier, subtotal                      │
//! │   ┌───────────────▼─────────────────────────────────────────────────┐   │
//! │   │  calculators                                                    │   │
//! │   │  TierPricing ─► subtotal ─► DiscountCodes / ShippingRates /     │   │
//! │   │                             LoyaltyProgram                      │   │
//! │   └───────────────┬─────────────────────────────────────────────────┘   │
//! │                   │                                                     │
//! │   ┌───────────────▼──┐  ┌───────────┐  ┌───────────┐  ┌────────────┐    │
//! │   │ catalog, cart    │  │   money   │  │   types   │  │ validation │    │
//! │   └──────────────────┘  └───────────┘  └───────────┘  └────────────┘    │
//! │                                                                         │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Tier, OrderSummary, ...)
//! - [`money`] - Integer `Money` (cents) and `Weight` (grams)
//! - [`catalog`] - Product lookup capability supplied by the host
//! - [`cart`] - Cart lines and their invariants
//! - [`calculators`] - Tier pricing, discount, shipping, loyalty
//! - [`checkout`] - `ShoppingCart` session facade
//! - [`config`] - Rule tables
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use order_pricing::{Customer, Money, Product, ShoppingCart, Tier, Weight};
//!
//! let laptop = Product::new(
//!     "p1",
//!     "Laptop",
//!     Money::from_major_minor(1000, 0),
//!     Weight::from_grams(2500),
//!     "electronics",
//! );
//! let catalog = vec![laptop.clone()];
//!
//! let mut cart = ShoppingCart::new(Customer::new("c1", Tier::Vip));
//! cart.add_item(&laptop, 1).unwrap();
//!
//! let summary = cart.order_summary(&catalog);
//! assert_eq!(summary.subtotal, Money::from_major_minor(850, 0)); // 15% off
//! assert!(summary.shipping_cost.is_zero());                      // VIP ships free
//! assert_eq!(summary.loyalty_points, 180);                       // (85 + 5) × 2
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculators;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculators::{AppliedDiscount, DiscountCodes, LoyaltyProgram, ShippingRates, TierPricing};
pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use checkout::ShoppingCart;
pub use config::PricingConfig;
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::{Money, Weight};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Also keeps `price × quantity` far away from `i64` overflow.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// The category tag that earns loyalty bonus points by default.
pub const ELECTRONICS: &str = "electronics";
