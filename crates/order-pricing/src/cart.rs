//! # Cart
//!
//! The set of lines a shopper intends to buy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation            Existing line?       Result                       │
//! │  ─────────            ──────────────       ──────                       │
//! │                                                                         │
//! │  add(id, n)           yes                  qty += n (merge)             │
//! │                       no                   insert qty = n               │
//! │                                                                         │
//! │  set_quantity(id, n)  n <= 0               line removed                 │
//! │                       n > 0                qty = n (replace, no merge)  │
//! │                                                                         │
//! │  remove(id)           -                    line removed (if present)    │
//! │                                                                         │
//! │  NOTE: A failed operation leaves the cart untouched.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are keyed by product id. Their order carries no meaning; the
//! `BTreeMap` only makes iteration (and therefore log output) deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::validation::{validate_product_id, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// One product and how many units of it are in the cart.
///
/// A line held by a [`Cart`] always has `quantity > 0`. Lines built directly
/// with [`CartLine::new`] are meant for calling calculators without a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        CartLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Quantity is always > 0 (setting it to 0 or below removes the line)
/// - At most `MAX_CART_ITEMS` (100) distinct lines
/// - At most `MAX_ITEM_QUANTITY` (999) units per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds units of a product, merging with an existing line.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(Validation)` for an empty id or a quantity outside 1..=999
    /// - `Err(QuantityTooLarge)` if the merged quantity would exceed 999
    /// - `Err(CartTooLarge)` if a new line would exceed 100 lines
    pub fn add(&mut self, product_id: &str, quantity: i64) -> PricingResult<()> {
        validate_product_id(product_id)?;
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.get_mut(product_id) {
            let merged = line.quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(PricingError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = merged;
            debug!(product_id, quantity = merged, "Merged cart line");
            return Ok(());
        }

        self.insert_new(product_id, quantity)
    }

    /// Replaces the quantity of a line.
    ///
    /// A quantity of 0 or below removes the line. A positive quantity is
    /// stored as-is, creating the line if it did not exist.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> PricingResult<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(PricingError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.lines.get_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                debug!(product_id, quantity, "Replaced cart line quantity");
                Ok(())
            }
            None => {
                validate_product_id(product_id)?;
                self.insert_new(product_id, quantity)
            }
        }
    }

    /// Removes a line, returning it if it was present.
    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let removed = self.lines.remove(product_id);
        if removed.is_some() {
            debug!(product_id, "Removed cart line");
        }
        removed
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Read-only view of all lines.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> + '_ {
        self.lines.values()
    }

    /// Returns the quantity held for a product, if any.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.lines.get(product_id).map(|line| line.quantity)
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn insert_new(&mut self, product_id: &str, quantity: i64) -> PricingResult<()> {
        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(PricingError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines
            .insert(product_id.to_string(), CartLine::new(product_id, quantity));
        debug!(product_id, quantity, "Added cart line");
        Ok(())
    }
}
