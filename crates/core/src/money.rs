//! Currency amounts held as integer cents.

use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};

/// Amount in the smallest currency unit (sen for MYR).
///
/// Signed: a net salary can go below zero and must print that way.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a wire decimal (e.g. `35`, `12.5`) to cents, rounding half away from zero.
    pub fn from_decimal(value: f64) -> DocumentResult<Self> {
        if !value.is_finite() {
            return Err(DocumentError::invalid(format!("amount is not a number: {value}")));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(DocumentError::invalid("amount out of range"));
        }
        Ok(Self(cents as i64))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by a quantity, failing on overflow.
    pub fn times(self, quantity: u32) -> DocumentResult<Self> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Self)
            .ok_or_else(|| DocumentError::invalid("line amount overflow"))
    }

    pub fn checked_add(self, other: Money) -> DocumentResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| DocumentError::invalid("amount total overflow"))
    }

    /// Absolute distance in cents between two amounts.
    pub fn distance(self, other: Money) -> u64 {
        self.0.abs_diff(other.0)
    }

    /// Two-decimal currency string: `RM35.00`, `RM-200.00`.
    pub fn format(self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{symbol}{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_two_decimals_with_symbol() {
        assert_eq!(Money::from_cents(3500).format("RM"), "RM35.00");
        assert_eq!(Money::from_cents(5).format("RM"), "RM0.05");
        assert_eq!(Money::ZERO.format("RM"), "RM0.00");
    }

    #[test]
    fn negative_amounts_keep_their_sign_after_the_symbol() {
        assert_eq!(Money::from_cents(-20_000).format("RM"), "RM-200.00");
        assert_eq!(Money::from_cents(-5).format("RM"), "RM-0.05");
    }

    #[test]
    fn decimals_round_to_nearest_cent() {
        assert_eq!(Money::from_decimal(35.0).unwrap().cents(), 3500);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(19.99).unwrap().cents(), 1999);
    }

    #[test]
    fn non_finite_decimals_are_rejected() {
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn times_detects_overflow() {
        assert!(Money::from_cents(i64::MAX).times(2).is_err());
        assert_eq!(Money::from_cents(2400).times(3).unwrap().cents(), 7200);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every amount prints with the symbol first and exactly two decimals.
        #[test]
        fn formatted_amount_always_has_two_decimals(cents in -10_000_000i64..10_000_000i64) {
            let text = Money::from_cents(cents).format("RM");
            prop_assert!(text.starts_with("RM"));
            let (_, decimals) = text.rsplit_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert_eq!(text.starts_with("RM-"), cents < 0);
        }
    }
}
