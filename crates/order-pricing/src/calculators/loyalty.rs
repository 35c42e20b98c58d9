//! # Loyalty Points
//!
//! ```text
//! base   = floor(subtotal / $10)
//! bonus  = 5 × units of every line in the bonus category ("electronics")
//! points = (base + bonus) × 2   for VIP
//!        =  base + bonus        otherwise
//! ```
//!
//! The VIP multiplier applies after the bonus is added, so a VIP earns
//! double bonus points too.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::{resolve_lines, Catalog};
use crate::money::Money;
use crate::types::{Category, Tier};
use crate::validation::{validate_at_least, ValidationResult};
use crate::ELECTRONICS;

/// Loyalty earning rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyProgram {
    /// Spend that earns one base point.
    pub cents_per_point: i64,
    /// The only category that earns bonus points.
    pub bonus_category: Category,
    pub bonus_points_per_unit: i64,
    pub vip_multiplier: i64,
}

impl Default for LoyaltyProgram {
    fn default() -> Self {
        LoyaltyProgram {
            cents_per_point: 1_000,
            bonus_category: Category::from(ELECTRONICS),
            bonus_points_per_unit: 5,
            vip_multiplier: 2,
        }
    }
}

impl LoyaltyProgram {
    pub fn multiplier(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Vip => self.vip_multiplier,
            Tier::Regular | Tier::Premium => 1,
        }
    }

    pub fn base_points(&self, subtotal: Money) -> i64 {
        // A zero divisor earns no base points
        subtotal
            .cents()
            .max(0)
            .checked_div(self.cents_per_point)
            .unwrap_or(0)
    }

    /// Bonus points for bonus-category units, before any multiplier.
    pub fn bonus_points<'a, I, C>(&self, lines: I, catalog: &C) -> i64
    where
        I: IntoIterator<Item = &'a CartLine>,
        C: Catalog + ?Sized,
    {
        resolve_lines(lines, catalog)
            .filter(|(_, product)| product.category == self.bonus_category)
            .map(|(line, _)| line.quantity * self.bonus_points_per_unit)
            .sum()
    }

    /// Points earned by the cart.
    pub fn points<'a, I, C>(&self, lines: I, catalog: &C, subtotal: Money, tier: Tier) -> i64
    where
        I: IntoIterator<Item = &'a CartLine>,
        C: Catalog + ?Sized,
    {
        (self.base_points(subtotal) + self.bonus_points(lines, catalog)) * self.multiplier(tier)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_at_least("cents per point", self.cents_per_point, 1)?;
        validate_at_least("bonus points per unit", self.bonus_points_per_unit, 0)?;
        validate_at_least("vip multiplier", self.vip_multiplier, 1)
    }
}
