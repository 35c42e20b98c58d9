//! # Shopping Cart Session
//!
//! `ShoppingCart` is the facade a host talks to. It owns one shopper's cart,
//! the shopper's customer record and the active discount code, and it runs
//! the calculators in dependency order when asked for a summary.
//!
//! ## Order Summary Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order_summary(&catalog)          (&self: cart cannot change mid-call)  │
//! │                                                                         │
//! │  1. subtotal = TierPricing::subtotal(lines, catalog, tier)             │
//! │  2. tax      = TierPricing::tax(subtotal)                              │
//! │  3. discount = active code × subtotal (0 without a code)               │
//! │  4. shipping = ShippingRates::cost(lines, catalog, subtotal, tier)     │
//! │  5. points   = LoyaltyProgram::points(lines, catalog, subtotal, tier)  │
//! │  6. total    = subtotal + tax − discount + shipping                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sessions
//! Each shopper gets their own `ShoppingCart`. The catalog and the
//! `PricingConfig` are read-only and may be shared between sessions.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::calculators::{discount_for, AppliedDiscount};
use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::{Customer, OrderSummary, Product, Tier};
use crate::validation::validate_product;

/// One shopper's cart, customer and discount code.
#[derive(Debug, Clone)]
pub struct ShoppingCart {
    customer: Customer,
    cart: Cart,
    discount: Option<AppliedDiscount>,
    config: Arc<PricingConfig>,
}

impl ShoppingCart {
    /// Creates an empty cart priced with the default rules.
    pub fn new(customer: Customer) -> Self {
        ShoppingCart {
            customer,
            cart: Cart::new(),
            discount: None,
            config: Arc::new(PricingConfig::default()),
        }
    }

    /// Creates an empty cart priced with shared rules.
    ///
    /// The rule tables have public fields, so the config is validated here
    /// even when it did not come from [`PricingConfig::from_toml_str`].
    ///
    /// ## Returns
    /// - `Err(Validation)` for an out-of-range rule (markdown above 100%,
    ///   a non-positive loyalty divisor, a negative fee, ...)
    pub fn with_config(customer: Customer, config: Arc<PricingConfig>) -> PricingResult<Self> {
        config.validate()?;

        Ok(ShoppingCart {
            config,
            ..Self::new(customer)
        })
    }

    // =========================================================================
    // Cart management
    // =========================================================================

    /// Adds units of a product, merging with any existing line.
    ///
    /// ## Returns
    /// - `Err(OutOfStock)` if the product's stock flag is false
    /// - `Err(Validation)` for a malformed product, or a quantity ≤ 0 or above
    ///   [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY)
    /// - `Err(QuantityTooLarge)` if merging would take the line above
    ///   [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY) units
    /// - `Err(CartTooLarge)` if a new line would exceed
    ///   [`MAX_CART_ITEMS`](crate::MAX_CART_ITEMS) lines
    ///
    /// Both limits are crate constants; a host that needs other bounds
    /// enforces them before calling.
    ///
    /// On error nothing is added or merged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> PricingResult<()> {
        if !product.in_stock {
            warn!(product_id = %product.id, "Rejected out-of-stock product");
            return Err(PricingError::OutOfStock {
                product_id: product.id.clone(),
            });
        }
        validate_product(product)?;

        self.cart.add(&product.id, quantity)
    }

    /// Replaces a line's quantity; 0 or below removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> PricingResult<()> {
        self.cart.set_quantity(product_id, quantity)
    }

    /// Removes a line, returning it if it was present.
    pub fn remove_item(&mut self, product_id: &str) -> Option<CartLine> {
        self.cart.remove(product_id)
    }

    /// Empties the cart. The discount code stays active.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Discount code
    // =========================================================================

    /// Activates a discount code, replacing the current one.
    ///
    /// ## Returns
    /// - `Ok(previous)`: the code that was replaced, if any
    /// - `Err(InvalidDiscountCode)`: unknown code; the current code stays
    pub fn apply_discount_code(&mut self, code: &str) -> PricingResult<Option<AppliedDiscount>> {
        let applied = self.config.discount_codes.lookup(code)?;
        debug!(code = %applied.code, rate = %applied.rate, "Applied discount code");
        Ok(self.discount.replace(applied))
    }

    /// Deactivates the current discount code and returns it.
    pub fn clear_discount_code(&mut self) -> Option<AppliedDiscount> {
        self.discount.take()
    }

    pub fn active_discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    // =========================================================================
    // Customer
    // =========================================================================

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Mutable access to the customer record; tier changes apply to the
    /// next calculation.
    pub fn customer_mut(&mut self) -> &mut Customer {
        &mut self.customer
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.customer.tier = tier;
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    // =========================================================================
    // Calculations
    // =========================================================================

    /// Tier-adjusted subtotal.
    pub fn subtotal<C: Catalog + ?Sized>(&self, catalog: &C) -> Money {
        self.config
            .pricing
            .subtotal(self.cart.lines(), catalog, self.customer.tier)
    }

    /// Shipping fee for the current cart.
    pub fn shipping_cost<C: Catalog + ?Sized>(&self, catalog: &C) -> Money {
        let subtotal = self.subtotal(catalog);
        self.config
            .shipping
            .cost(self.cart.lines(), catalog, subtotal, self.customer.tier)
    }

    /// Loyalty points the current cart would earn.
    pub fn loyalty_points<C: Catalog + ?Sized>(&self, catalog: &C) -> i64 {
        let subtotal = self.subtotal(catalog);
        self.config
            .loyalty
            .points(self.cart.lines(), catalog, subtotal, self.customer.tier)
    }

    /// Computes every derived value from one consistent snapshot.
    pub fn order_summary<C: Catalog + ?Sized>(&self, catalog: &C) -> OrderSummary {
        let tier = self.customer.tier;
        let config = &self.config;

        let subtotal = config.pricing.subtotal(self.cart.lines(), catalog, tier);
        let tax = config.pricing.tax(subtotal);
        let discount = discount_for(subtotal, self.discount.as_ref());
        let shipping_cost = config
            .shipping
            .cost(self.cart.lines(), catalog, subtotal, tier);
        let loyalty_points = config
            .loyalty
            .points(self.cart.lines(), catalog, subtotal, tier);
        let total = subtotal + tax - discount + shipping_cost;

        debug!(
            customer_id = %self.customer.id,
            %tier,
            %subtotal,
            %tax,
            %discount,
            %shipping_cost,
            %total,
            loyalty_points,
            "Computed order summary"
        );

        OrderSummary {
            subtotal,
            tax,
            discount,
            shipping_cost,
            total,
            loyalty_points,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Weight;
    use crate::types::Rate;

    fn customer(tier: Tier) -> Customer {
        Customer {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            address: "123 Main St".to_string(),
            loyalty_points: 100,
            tier,
        }
    }

    fn laptop() -> Product {
        Product::new("p1", "Laptop", Money::from_cents(100_000), Weight::from_grams(2500), "electronics")
    }

    fn book() -> Product {
        Product::new("p2", "Book", Money::from_cents(2_000), Weight::from_grams(500), "books")
    }

    fn smartphone() -> Product {
        Product::new("p3", "Smartphone", Money::from_cents(80_000), Weight::from_grams(300), "electronics")
    }

    fn products() -> Vec<Product> {
        vec![laptop(), book(), smartphone()]
    }

    // -------------------------------------------------------------------------
    // Cart management
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_cart_is_empty() {
        let cart = ShoppingCart::new(customer(Tier::Regular));
        let summary = cart.order_summary(&products());

        assert_eq!(summary, OrderSummary {
            shipping_cost: Money::from_cents(500),
            total: Money::from_cents(500),
            ..Default::default()
        });
    }

    #[test]
    fn test_add_items() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.add_item(&book(), 2).unwrap();

        // 1000 + (2 × 20)
        assert_eq!(cart.order_summary(&products()).subtotal.cents(), 104_000);
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.add_item(&laptop(), 2).unwrap();

        assert_eq!(cart.order_summary(&products()).subtotal.cents(), 300_000);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.update_quantity("p1", 2).unwrap();

        assert_eq!(cart.order_summary(&products()).subtotal.cents(), 200_000);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.update_quantity("p1", 0).unwrap();

        assert!(cart.cart().is_empty());
        assert!(cart.order_summary(&products()).subtotal.is_zero());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.add_item(&book(), 1).unwrap();

        assert!(cart.remove_item("p1").is_some());
        assert!(cart.remove_item("p1").is_none());
        assert_eq!(cart.subtotal(&products()).cents(), 2_000);
    }

    #[test]
    fn test_out_of_stock_is_rejected() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        let out_of_stock = Product::new("p4", "Tablet", Money::from_cents(50_000), Weight::from_grams(700), "electronics")
            .with_stock(false);

        let err = cart.add_item(&out_of_stock, 1).unwrap_err();
        assert!(matches!(err, PricingError::OutOfStock { ref product_id } if product_id == "p4"));
        assert_eq!(err.to_string(), "Product p4 is out of stock");
        assert!(cart.cart().is_empty());
        assert!(cart.order_summary(&products()).subtotal.is_zero());
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));

        assert!(matches!(
            cart.add_item(&laptop(), -1),
            Err(PricingError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let mut negative_price = book();
        negative_price.price = Money::from_cents(-100);
        assert!(cart.add_item(&negative_price, 1).is_err());
        assert!(cart.cart().is_empty());
    }

    // -------------------------------------------------------------------------
    // Tier pricing and tax
    // -------------------------------------------------------------------------

    #[test]
    fn test_premium_price() {
        let mut cart = ShoppingCart::new(customer(Tier::Premium));
        cart.add_item(&laptop(), 1).unwrap();

        assert_eq!(cart.order_summary(&products()).subtotal.cents(), 90_000);
    }

    #[test]
    fn test_vip_price() {
        let mut cart = ShoppingCart::new(customer(Tier::Vip));
        cart.add_item(&laptop(), 1).unwrap();

        assert_eq!(cart.order_summary(&products()).subtotal.cents(), 85_000);
    }

    #[test]
    fn test_tax() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();

        assert_eq!(cart.order_summary(&products()).tax.cents(), 10_000);
    }

    #[test]
    fn test_tier_change_applies_to_next_summary() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        assert_eq!(cart.subtotal(&products()).cents(), 100_000);

        cart.set_tier(Tier::Vip);
        assert_eq!(cart.subtotal(&products()).cents(), 85_000);

        cart.customer_mut().tier = Tier::Premium;
        assert_eq!(cart.subtotal(&products()).cents(), 90_000);
    }

    // -------------------------------------------------------------------------
    // Discount codes
    // -------------------------------------------------------------------------

    #[test]
    fn test_summer20() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.apply_discount_code("SUMMER20").unwrap();

        assert_eq!(cart.order_summary(&products()).discount.cents(), 20_000);
    }

    #[test]
    fn test_latest_code_wins() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();

        assert_eq!(cart.apply_discount_code("SAVE10").unwrap(), None);
        let replaced = cart.apply_discount_code("SUMMER20").unwrap();
        assert_eq!(replaced.map(|d| d.code), Some("SAVE10".to_string()));

        assert_eq!(cart.order_summary(&products()).discount.cents(), 20_000);
    }

    #[test]
    fn test_invalid_code_keeps_previous() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.apply_discount_code("VIP15").unwrap();

        let err = cart.apply_discount_code("BOGUS").unwrap_err();
        assert!(matches!(err, PricingError::InvalidDiscountCode { .. }));
        assert_eq!(cart.active_discount().map(|d| d.code.as_str()), Some("VIP15"));
        assert_eq!(cart.order_summary(&products()).discount.cents(), 15_000);
    }

    #[test]
    fn test_clear_discount_code() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.apply_discount_code("SAVE10").unwrap();

        assert!(cart.clear_discount_code().is_some());
        assert!(cart.active_discount().is_none());
        assert!(cart.order_summary(&products()).discount.is_zero());
    }

    #[test]
    fn test_clear_keeps_discount() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.apply_discount_code("SAVE10").unwrap();
        cart.clear();

        assert!(cart.cart().is_empty());
        assert!(cart.active_discount().is_some());
    }

    // -------------------------------------------------------------------------
    // Shipping
    // -------------------------------------------------------------------------

    #[test]
    fn test_base_shipping() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&book(), 1).unwrap();

        // Base $5 + (0.5 kg × $0.1)
        assert_eq!(cart.shipping_cost(&products()).cents(), 505);
    }

    #[test]
    fn test_free_shipping_over_100() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();

        assert!(cart.shipping_cost(&products()).is_zero());
    }

    #[test]
    fn test_free_shipping_for_vip() {
        let mut cart = ShoppingCart::new(customer(Tier::Vip));
        cart.add_item(&book(), 1).unwrap();

        assert!(cart.shipping_cost(&products()).is_zero());
    }

    #[test]
    fn test_exactly_100_is_not_free() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        let gadget = Product::new("a", "Gadget", Money::from_cents(10_000), Weight::from_grams(1000), "other");
        cart.add_item(&gadget, 1).unwrap();

        let summary = cart.order_summary(&vec![gadget]);
        assert_eq!(summary.subtotal.cents(), 10_000);
        assert_eq!(summary.tax.cents(), 1_000);
        assert!(summary.discount.is_zero());
        // $5.00 + 1 kg × $0.10
        assert_eq!(summary.shipping_cost.cents(), 510);
        assert_eq!(summary.total.cents(), 11_510);
        assert_eq!(summary.loyalty_points, 10);
    }

    // -------------------------------------------------------------------------
    // Loyalty points
    // -------------------------------------------------------------------------

    #[test]
    fn test_points_for_multiple_items() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&book(), 5).unwrap();

        // $100 worth of books
        assert_eq!(cart.loyalty_points(&products()), 10);
    }

    #[test]
    fn test_electronics_bonus() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.add_item(&smartphone(), 1).unwrap();

        // 180 base points + (2 × 5) electronics bonus
        assert_eq!(cart.loyalty_points(&products()), 190);
    }

    #[test]
    fn test_vip_points_doubled() {
        let mut cart = ShoppingCart::new(customer(Tier::Vip));
        cart.add_item(&laptop(), 1).unwrap();

        // (85 points + 5 bonus) × 2
        assert_eq!(cart.loyalty_points(&products()), 180);
    }

    // -------------------------------------------------------------------------
    // Order summary
    // -------------------------------------------------------------------------

    #[test]
    fn test_complete_order_summary() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.apply_discount_code("SAVE10").unwrap();

        let summary = cart.order_summary(&products());
        assert_eq!(summary.subtotal.cents(), 100_000);
        assert_eq!(summary.tax.cents(), 10_000);
        assert_eq!(summary.discount.cents(), 10_000);
        assert!(summary.shipping_cost.is_zero());
        assert_eq!(summary.total.cents(), 100_000);
        assert_eq!(summary.loyalty_points, 105);
    }

    #[test]
    fn test_complex_premium_order() {
        let mut cart = ShoppingCart::new(customer(Tier::Premium));
        cart.add_item(&laptop(), 2).unwrap();
        cart.add_item(&book(), 3).unwrap();
        cart.apply_discount_code("SUMMER20").unwrap();

        let summary = cart.order_summary(&products());
        // (2 × 1000 × 0.9) + (3 × 20 × 0.9) = 1854
        assert_eq!(summary.subtotal.cents(), 185_400);
        assert_eq!(summary.tax.cents(), 18_540);
        assert_eq!(summary.discount.cents(), 37_080);
        assert!(summary.shipping_cost.is_zero());
        assert_eq!(summary.total.cents(), 166_860);
        // 185 base + 2 × 5 bonus
        assert_eq!(summary.loyalty_points, 195);
    }

    #[test]
    fn test_unknown_catalog_entries_are_ignored() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));
        cart.add_item(&laptop(), 1).unwrap();
        cart.add_item(&book(), 1).unwrap();

        // Catalog without the laptop: only the book counts everywhere.
        let summary = cart.order_summary(&vec![book()]);
        assert_eq!(summary.subtotal.cents(), 2_000);
        assert_eq!(summary.shipping_cost.cents(), 505);
        assert_eq!(summary.loyalty_points, 2);
    }

    #[test]
    fn test_custom_config() {
        let config = PricingConfig::from_toml_str("[shipping]\nfree_tiers = []\n").unwrap();
        let mut cart = ShoppingCart::with_config(customer(Tier::Vip), Arc::new(config)).unwrap();
        cart.add_item(&book(), 1).unwrap();

        // VIP no longer ships free: $5.00 + 0.5 kg × $0.10
        assert_eq!(cart.shipping_cost(&products()).cents(), 505);
    }

    #[test]
    fn test_with_config_rejects_invalid_rules() {
        let mut config = PricingConfig::default();
        config.loyalty.cents_per_point = -1_000;
        let err = ShoppingCart::with_config(customer(Tier::Regular), Arc::new(config)).unwrap_err();
        assert!(matches!(err, PricingError::Validation(ValidationError::OutOfRange { .. })));

        let mut config = PricingConfig::default();
        config.pricing.vip_markdown_bps = Rate::from_bps(12_000);
        assert!(ShoppingCart::with_config(customer(Tier::Vip), Arc::new(config)).is_err());
    }

    #[test]
    fn test_quantity_limit_on_add_item() {
        let mut cart = ShoppingCart::new(customer(Tier::Regular));

        let err = cart.add_item(&book(), 1_000).unwrap_err();
        assert!(matches!(err, PricingError::Validation(ValidationError::OutOfRange { .. })));
        assert!(cart.cart().is_empty());

        cart.add_item(&book(), 999).unwrap();
        assert!(matches!(
            cart.add_item(&book(), 1),
            Err(PricingError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.cart().quantity_of("p2"), Some(999));
    }

    #[test]
    fn test_fractional_cent_prices_round_once() {
        let mut cart = ShoppingCart::new(customer(Tier::Premium));
        let candy = Product::new("c1", "Candy", Money::from_cents(25), Weight::zero(), "food");
        cart.add_item(&candy, 445).unwrap();

        // 445 × $0.25 × 0.9 = $100.125, over the free-shipping line
        let summary = cart.order_summary(&vec![candy]);
        assert_eq!(summary.subtotal.cents(), 10_013);
        assert!(summary.shipping_cost.is_zero());
        assert_eq!(summary.loyalty_points, 10);
    }
}
