//! # Discount Codes
//!
//! The table of recognized promotional codes and the code a session has
//! applied.
//!
//! ```text
//! ┌──────────┬────────┐
//! │ Code     │ Rate   │   Exact, case-sensitive match.
//! ├──────────┼────────┤   One active code per cart; applying another
//! │ SAVE10   │ 10%    │   code replaces it (no stacking, no expiry).
//! │ SUMMER20 │ 20%    │
//! │ VIP15    │ 15%    │
//! └──────────┴────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::Money;
use crate::types::Rate;
use crate::validation::{validate_rate, ValidationResult};

/// Recognized discount codes and their rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountCodes {
    codes: BTreeMap<String, Rate>,
}

impl Default for DiscountCodes {
    fn default() -> Self {
        DiscountCodes::from_iter([
            ("SAVE10", Rate::from_bps(1000)),
            ("SUMMER20", Rate::from_bps(2000)),
            ("VIP15", Rate::from_bps(1500)),
        ])
    }
}

impl<S: Into<String>> FromIterator<(S, Rate)> for DiscountCodes {
    fn from_iter<T: IntoIterator<Item = (S, Rate)>>(iter: T) -> Self {
        DiscountCodes {
            codes: iter.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
        }
    }
}

impl DiscountCodes {
    /// Resolves a code into an applicable discount.
    ///
    /// ## Returns
    /// - `Err(InvalidDiscountCode)` if the code is not recognized
    pub fn lookup(&self, code: &str) -> PricingResult<AppliedDiscount> {
        match self.codes.get(code) {
            Some(&rate) => Ok(AppliedDiscount {
                code: code.to_string(),
                rate,
            }),
            None => {
                warn!(code, "Rejected unknown discount code");
                Err(PricingError::InvalidDiscountCode {
                    code: code.to_string(),
                })
            }
        }
    }

    pub fn rate(&self, code: &str) -> Option<Rate> {
        self.codes.get(code).copied()
    }

    /// Recognized codes in lexical order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.keys().map(String::as_str)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        for (code, rate) in &self.codes {
            if code.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "discount code".to_string(),
                });
            }
            validate_rate(&format!("discount code {}", code), *rate)?;
        }
        Ok(())
    }
}

/// A recognized code that has been applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub code: String,
    pub rate: Rate,
}

impl AppliedDiscount {
    /// Discount amount on `subtotal`.
    pub fn amount(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.rate)
    }
}

/// Discount for an optional active code; zero when none was applied.
pub fn discount_for(subtotal: Money, active: Option<&AppliedDiscount>) -> Money {
    active.map_or(Money::zero(), |discount| discount.amount(subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        let codes = DiscountCodes::default();
        assert_eq!(codes.lookup("SAVE10").unwrap().rate, Rate::from_bps(1000));
        assert_eq!(codes.lookup("SUMMER20").unwrap().rate, Rate::from_bps(2000));
        assert_eq!(codes.lookup("VIP15").unwrap().rate, Rate::from_bps(1500));
        assert_eq!(codes.codes().collect::<Vec<_>>(), vec!["SAVE10", "SUMMER20", "VIP15"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let codes = DiscountCodes::default();
        let err = codes.lookup("save10").unwrap_err();
        assert!(matches!(err, PricingError::InvalidDiscountCode { code } if code == "save10"));
        assert!(codes.lookup("SAVE10 ").is_err());
        assert!(codes.lookup("").is_err());
    }

    #[test]
    fn test_discount_amount() {
        let codes = DiscountCodes::default();
        let summer = codes.lookup("SUMMER20").unwrap();
        assert_eq!(summer.amount(Money::from_cents(100_000)).cents(), 20_000);
    }

    #[test]
    fn test_no_active_code_means_zero() {
        assert!(discount_for(Money::from_cents(100_000), None).is_zero());
    }

    #[test]
    fn test_custom_table_validation() {
        let codes: DiscountCodes = [("HALF", Rate::from_bps(5000))].into_iter().collect();
        assert!(codes.validate().is_ok());
        assert_eq!(codes.rate("HALF"), Some(Rate::from_bps(5000)));

        let broken: DiscountCodes = [("  ", Rate::from_bps(500))].into_iter().collect();
        assert!(broken.validate().is_err());
    }
}
