//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the wire as plain JSON numbers (`19.99`) but are held as
//! [`Decimal`] so that totals such as `19.99 * 2` come out as exactly `39.98`.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Quantity;

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("'{0}' is not a number")]
    Invalid(String),
    /// Prices cannot be negative.
    #[error("price must not be negative")]
    Negative,
    /// The result does not fit in a decimal.
    #[error("amount is too large")]
    Overflow,
}

/// A non-negative monetary amount.
///
/// ## Examples
///
/// ```
/// use shopmock_core::{Price, Quantity};
///
/// let price: Price = "19.99".parse().unwrap();
/// let line = price.checked_times(Quantity::new(2)).unwrap();
/// assert_eq!(line.to_string(), "39.98");
///
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero amount, used as the starting total of carts and orders.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from an amount in cents (e.g. `1999` for `19.99`).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Price of `quantity` units, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: Quantity) -> Option<Self> {
        self.0
            .checked_mul(Decimal::from(quantity.as_u32()))
            .map(|amount| Self(amount.normalize()))
    }

    /// Sum of two prices, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .map(|amount| Self(amount.normalize()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse plain (`19.99`) or scientific (`1.5e2`) notation, the two forms a
    /// JSON number can take.
    ///
    /// A well-formed number beyond the decimal range is `Overflow`, not
    /// `Invalid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
            Ok(amount) => Self::new(amount),
            Err(_) => Err(match s.parse::<f64>() {
                Ok(value) if value.is_finite() && value < 0.0 => PriceError::Negative,
                Ok(value) if value.is_finite() && value >= 1.0 => PriceError::Overflow,
                _ => PriceError::Invalid(s.to_owned()),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_scientific() {
        assert_eq!("29.99".parse::<Price>().unwrap(), Price::from_cents(2999).unwrap());
        assert_eq!("1.5e2".parse::<Price>().unwrap(), Price::from_cents(15000).unwrap());
        assert_eq!("0".parse::<Price>().unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert_eq!("-0.01".parse::<Price>(), Err(PriceError::Negative));
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_parse_out_of_range_is_overflow() {
        assert_eq!("1e30".parse::<Price>(), Err(PriceError::Overflow));
        assert_eq!(
            "100000000000000000000000000000000".parse::<Price>(),
            Err(PriceError::Overflow)
        );
        assert_eq!("-1e30".parse::<Price>(), Err(PriceError::Negative));
        assert!(matches!("1e30x".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_times_is_exact() {
        let price = Price::from_cents(1999).unwrap();
        let total = price.checked_times(Quantity::new(2)).unwrap();
        assert_eq!(total, Price::from_cents(3998).unwrap());
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Price::new(Decimal::MAX).unwrap();
        assert!(max.checked_add(max).is_none());
        assert!(max.checked_times(Quantity::new(2)).is_none());
    }

    #[test]
    fn test_serializes_as_json_number() {
        let price = Price::from_cents(4999).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "49.99");

        let parsed: Price = serde_json::from_str("49.99").unwrap();
        assert_eq!(parsed, price);
    }
}
