//! # Shipping
//!
//! ## Rule (checked in order)
//! ```text
//! tier in free_tiers (VIP)  ──► $0.00
//! subtotal > free_over      ──► $0.00      ($100.00 exactly is NOT free)
//! otherwise                 ──► base_rate + total_weight × rate_per_kg
//!                               $5.00      + kg          × $0.10
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::{resolve_lines, Catalog};
use crate::money::{Money, Weight};
use crate::types::Tier;
use crate::validation::{validate_non_negative_money, ValidationResult};

/// Shipping fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRates {
    pub base_rate_cents: Money,
    pub rate_per_kg_cents: Money,
    /// Subtotals strictly above this ship free.
    pub free_over_cents: Money,
    /// Tiers that always ship free.
    pub free_tiers: Vec<Tier>,
}

impl Default for ShippingRates {
    fn default() -> Self {
        ShippingRates {
            base_rate_cents: Money::from_cents(500),
            rate_per_kg_cents: Money::from_cents(10),
            free_over_cents: Money::from_cents(10_000),
            free_tiers: vec![Tier::Vip],
        }
    }
}

impl ShippingRates {
    /// Whether an order ships free. Either condition alone suffices.
    pub fn ships_free(&self, subtotal: Money, tier: Tier) -> bool {
        self.free_tiers.contains(&tier) || subtotal > self.free_over_cents
    }

    /// Combined weight of the resolvable lines.
    pub fn total_weight<'a, I, C>(&self, lines: I, catalog: &C) -> Weight
    where
        I: IntoIterator<Item = &'a CartLine>,
        C: Catalog + ?Sized,
    {
        resolve_lines(lines, catalog)
            .map(|(line, product)| product.weight * line.quantity)
            .sum()
    }

    /// Shipping fee for the cart.
    pub fn cost<'a, I, C>(&self, lines: I, catalog: &C, subtotal: Money, tier: Tier) -> Money
    where
        I: IntoIterator<Item = &'a CartLine>,
        C: Catalog + ?Sized,
    {
        if self.ships_free(subtotal, tier) {
            return Money::zero();
        }

        self.base_rate_cents + self.total_weight(lines, catalog).charge(self.rate_per_kg_cents)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_non_negative_money("shipping base rate", self.base_rate_cents)?;
        validate_non_negative_money("shipping rate per kg", self.rate_per_kg_cents)?;
        validate_non_negative_money("free shipping threshold", self.free_over_cents)
    }
}
