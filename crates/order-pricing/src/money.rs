//! # Money Module
//!
//! Provides the `Money` and `Weight` value types.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1854 × 0.1 = 185.40000000000003  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    185400 cents × 1000 bps / 10000 = 18540 cents  ✅ exact              │
//! │                                                                         │
//! │  Weights get the same treatment: integer grams.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_pricing::money::{Money, Weight};
//! use order_pricing::types::Rate;
//!
//! let price = Money::from_major_minor(1000, 0); // $1000.00
//! let vip_price = price.apply_markdown(Rate::from_bps(1500)); // 15% off
//! assert_eq!(vip_price, Money::from_major_minor(850, 0));
//!
//! // $0.10 per kg on a 2.5 kg parcel
//! let fee = Weight::from_grams(2500).charge(Money::from_cents(10));
//! assert_eq!(fee.cents(), 25);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► unit price (tier markdown) ──► line total ──► subtotal
///                                                                    │
///                  ┌──────────────┬───────────────┬─────────────────┤
///                  ▼              ▼               ▼                 ▼
///                 tax          discount        shipping          loyalty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use order_pricing::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `rate` of this amount, rounded half-up to the nearest cent.
    ///
    /// Used for tax and discount amounts.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use order_pricing::money::Money;
    /// use order_pricing::types::Rate;
    ///
    /// let subtotal = Money::from_cents(185_400); // $1854.00
    /// let tax = subtotal.percentage(Rate::from_bps(1000)); // 10%
    /// assert_eq!(tax.cents(), 18_540);
    /// ```
    pub fn percentage(&self, rate: Rate) -> Money {
        // i128 keeps large carts from overflowing before the division
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Reduces this amount by `rate` and returns what is left.
    ///
    /// The remaining part is rounded half-up, so $100.125 becomes $100.13.
    /// A rate above 100% leaves nothing.
    pub fn apply_markdown(&self, rate: Rate) -> Money {
        let kept = Rate::FULL_BPS.saturating_sub(rate.bps());
        self.percentage(Rate::from_bps(kept))
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Display shows money as `$1234.56`.
///
/// ## Note
/// This is for debugging and logs. Locale formatting belongs to the host.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Weight Type
// =============================================================================

/// A product or parcel weight in grams.
///
/// Shipping rates are quoted per kilogram; grams keep fractional kilograms
/// (a 0.5 kg book) exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Weight(i64);

impl Weight {
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Weight(grams)
    }

    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Charge for carrying this weight at `rate_per_kg`, rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use order_pricing::money::{Money, Weight};
    ///
    /// // 4 kg at $0.10/kg
    /// let fee = Weight::from_grams(4000).charge(Money::from_cents(10));
    /// assert_eq!(fee.cents(), 40);
    /// ```
    pub fn charge(&self, rate_per_kg: Money) -> Money {
        let cents = (self.0 as i128 * rate_per_kg.cents() as i128 + 500) / 1000;
        Money::from_cents(cents as i64)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:03} kg", sign, (self.0 / 1000).abs(), (self.0 % 1000).abs())
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl Mul<i64> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Weight(self.0 * qty)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
