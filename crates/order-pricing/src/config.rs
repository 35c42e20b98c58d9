//! # Pricing Configuration
//!
//! The rule tables every calculator reads.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML document handed over by the host (highest priority)           │
//! │     Only the keys present override anything.                           │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                   │
//! │     10% tax, 10%/15% tier markdowns, SAVE10/SUMMER20/VIP15,            │
//! │     $5 + $0.10/kg shipping, free over $100 or for VIP,                 │
//! │     1 point per $10, +5 per electronics unit, ×2 for VIP               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate never touches the file system: the host reads the document and
//! passes the text.
//!
//! ## Configuration Format
//! ```toml
//! [pricing]
//! tax_rate_bps = 1000
//! premium_markdown_bps = 1000
//! vip_markdown_bps = 1500
//!
//! [discount_codes]
//! SAVE10 = 1000
//! SUMMER20 = 2000
//! VIP15 = 1500
//!
//! [shipping]
//! base_rate_cents = 500
//! rate_per_kg_cents = 10
//! free_over_cents = 10000
//! free_tiers = ["vip"]
//!
//! [loyalty]
//! cents_per_point = 1000
//! bonus_category = "electronics"
//! bonus_points_per_unit = 5
//! vip_multiplier = 2
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculators::{DiscountCodes, LoyaltyProgram, ShippingRates, TierPricing};
use crate::error::{PricingError, PricingResult};
use crate::validation::ValidationResult;

/// All pricing rules for a store.
///
/// Shared read-only between sessions, usually behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub pricing: TierPricing,
    /// Replaces the whole default table when present.
    pub discount_codes: DiscountCodes,
    pub shipping: ShippingRates,
    pub loyalty: LoyaltyProgram,
}

impl PricingConfig {
    /// Parses and validates a TOML rule document.
    ///
    /// ## Example
    /// ```rust
    /// use order_pricing::config::PricingConfig;
    ///
    /// let config = PricingConfig::from_toml_str("[shipping]\nbase_rate_cents = 700\n").unwrap();
    /// assert_eq!(config.shipping.base_rate_cents.cents(), 700);
    /// // Everything not mentioned keeps its default.
    /// assert_eq!(config.pricing.tax_rate_bps.bps(), 1000);
    /// ```
    pub fn from_toml_str(document: &str) -> PricingResult<Self> {
        let config: PricingConfig =
            toml::from_str(document).map_err(|e| PricingError::InvalidConfig(e.to_string()))?;
        config.validate()?;

        info!(
            tax_rate = %config.pricing.tax_rate_bps,
            discount_codes = config.discount_codes.codes().count(),
            "Loaded pricing configuration"
        );

        Ok(config)
    }

    /// Serializes the rules back to TOML (e.g. to show effective settings).
    pub fn to_toml_string(&self) -> PricingResult<String> {
        toml::to_string(self).map_err(|e| PricingError::InvalidConfig(e.to_string()))
    }

    /// Checks every rule table.
    pub fn validate(&self) -> ValidationResult<()> {
        self.pricing.validate()?;
        self.discount_codes.validate()?;
        self.shipping.validate()?;
        self.loyalty.validate()
    }
}
