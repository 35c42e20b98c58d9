//! # Domain Types
//!
//! Core domain types used by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │  OrderSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  subtotal       │       │
//! │  │  price (Money)  │   │  profile fields │   │  tax            │       │
//! │  │  weight (grams) │   │  tier           │   │  discount       │       │
//! │  │  category       │   │                 │   │  shipping_cost  │       │
//! │  │  in_stock       │   │                 │   │  total, points  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │      Tier       │   │    Category     │       │
//! │  │  bps (u32)      │   │  Regular        │   │  open tag       │       │
//! │  │  1000 = 10%     │   │  Premium, Vip   │   │  "electronics"  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are reference data owned by an external catalog; the engine only
//! reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, Weight};

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (flat tax, SAVE10, Premium markdown)
///
/// Used for tax, tier markdowns and discount codes alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// 100% in basis points.
    pub const FULL_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Tier
// =============================================================================

/// Customer pricing tier.
///
/// Variants are declared in rank order, so `Tier::Regular < Tier::Premium <
/// Tier::Vip`.
///
/// ```text
/// ┌──────────┬───────────────┬──────────────────┬──────────────────┐
/// │ Tier     │ Unit price    │ Shipping         │ Loyalty          │
/// ├──────────┼───────────────┼──────────────────┼──────────────────┤
/// │ Regular  │ list price    │ standard rules   │ ×1               │
/// │ Premium  │ 10% off       │ standard rules   │ ×1               │
/// │ Vip      │ 15% off       │ always free      │ ×2 (incl. bonus) │
/// └──────────┴───────────────┴──────────────────┴──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Regular,
    Premium,
    Vip,
}

impl Tier {
    /// All tiers, lowest rank first.
    pub const ALL: [Tier; 3] = [Tier::Regular, Tier::Premium, Tier::Vip];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Regular => write!(f, "regular"),
            Tier::Premium => write!(f, "premium"),
            Tier::Vip => write!(f, "vip"),
        }
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Tier::Regular),
            "premium" => Ok(Tier::Premium),
            "vip" => Ok(Tier::Vip),
            _ => Err(ValidationError::NotAllowed {
                field: "tier".to_string(),
                allowed: Tier::ALL.iter().map(Tier::to_string).collect(),
            }),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category tag.
///
/// Categories are an open set of strings. Only the loyalty program's bonus
/// category (`"electronics"` by default) triggers any pricing logic; every
/// other tag is inert.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category(String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Category(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison with a tag.
    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category::new(tag)
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Category(tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier; cart lines refer to products by this id.
    pub id: String,

    /// Display name (not used in any calculation).
    pub name: String,

    /// List price before any tier markdown.
    pub price: Money,

    /// Shipping weight of one unit.
    pub weight: Weight,

    pub category: Category,

    /// Products with `in_stock == false` cannot be added to a cart.
    pub in_stock: bool,
}

impl Product {
    /// Creates an in-stock product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        weight: Weight,
        category: impl Into<Category>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            weight,
            category: category.into(),
            in_stock: true,
        }
    }

    /// Returns the same product with the given stock flag.
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The shopper a cart belongs to.
///
/// Only `tier` affects pricing. The profile fields and the loyalty balance
/// are carried for the host and never read or written by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Balance held by the host's loyalty ledger.
    pub loyalty_points: i64,
    pub tier: Tier,
}

impl Customer {
    pub fn new(id: impl Into<String>, tier: Tier) -> Self {
        Customer {
            id: id.into(),
            tier,
            ..Default::default()
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Snapshot of every derived value for one cart at one moment.
///
/// Computed fresh on every request, never cached.
/// `total = subtotal + tax - discount + shipping_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub shipping_cost: Money,
    pub total: Money,
    pub loyalty_points: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
