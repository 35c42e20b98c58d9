//! # Tier Pricing
//!
//! Turns list prices into what a customer of a given tier pays, sums the
//! cart into a subtotal and applies the flat tax.
//!
//! ## User Workflow
//! ```text
//! Product: Laptop $1000.00, customer tier VIP
//!      │
//!      ▼
//! unit_price() ─► $1000.00 − 15% = $850.00
//!      │
//!      ▼
//! subtotal() ──► (Σ list price × quantity) − markdown, rounded once
//!      │         (unknown products skipped)
//!      │
//!      ▼
//! tax() ───────► subtotal × 10%
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::{resolve_lines, Catalog};
use crate::money::Money;
use crate::types::{Product, Rate, Tier};
use crate::validation::{validate_rate, ValidationResult};

/// Tier markdowns and the tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPricing {
    /// Flat tax applied to the subtotal.
    pub tax_rate_bps: Rate,
    pub premium_markdown_bps: Rate,
    pub vip_markdown_bps: Rate,
}

impl Default for TierPricing {
    fn default() -> Self {
        TierPricing {
            tax_rate_bps: Rate::from_bps(1000),
            premium_markdown_bps: Rate::from_bps(1000),
            vip_markdown_bps: Rate::from_bps(1500),
        }
    }
}

impl TierPricing {
    /// Markdown applied to list prices for `tier`.
    pub fn markdown(&self, tier: Tier) -> Rate {
        match tier {
            Tier::Regular => Rate::zero(),
            Tier::Premium => self.premium_markdown_bps,
            Tier::Vip => self.vip_markdown_bps,
        }
    }

    /// Per-unit price for a customer of `tier`, rounded to the cent.
    ///
    /// For display only; `subtotal` does not sum these.
    pub fn unit_price(&self, product: &Product, tier: Tier) -> Money {
        product.price.apply_markdown(self.markdown(tier))
    }

    /// Sum of list-price line totals with the tier markdown taken off.
    ///
    /// The markdown is the same for every line, so it is applied once to the
    /// list total and the subtotal is rounded a single time.
    ///
    /// Lines whose product is not in the catalog contribute nothing.
    pub fn subtotal<'a, I, C>(&self, lines: I, catalog: &C, tier: Tier) -> Money
    where
        I: IntoIterator<Item = &'a CartLine>,
        C: Catalog + ?Sized,
    {
        let list_total: Money = resolve_lines(lines, catalog)
            .map(|(line, product)| product.price.multiply_quantity(line.quantity))
            .sum();

        list_total.apply_markdown(self.markdown(tier))
    }

    /// Flat tax on a subtotal.
    pub fn tax(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.tax_rate_bps)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate("tax rate", self.tax_rate_bps)?;
        validate_rate("premium markdown", self.premium_markdown_bps)?;
        validate_rate("vip markdown", self.vip_markdown_bps)
    }
}
