//! Book price with a two-decimal format rule.
//!
//! A price is accepted only if its textual form matches
//! `^\d+(\.\d{1,2})?$`: digits, optionally followed by a point and one or two
//! fractional digits. That rules out negative values, exponents and anything
//! with three or more decimals before the value ever reaches storage.

use core::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Textual shape every price must have.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("Invalid regex"));

/// Errors that can occur when validating a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// No value (absent or `null`).
    #[error("price should not be empty")]
    Missing,
    /// The value is not a number at all (string, bool, object...).
    #[error("price must be a number")]
    NotANumber,
    /// The value is numeric but negative, has too many decimals, or uses an
    /// exponent.
    #[error("price must be a valid number with up to 2 decimal places")]
    InvalidFormat,
}

/// A non-negative decimal amount with at most two fractional digits.
///
/// ## Examples
///
/// ```
/// use bookstore_core::Price;
///
/// assert!(Price::parse("19.99").is_ok());
/// assert!(Price::parse("5").is_ok());
/// assert!(Price::parse("0.5").is_ok());
///
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1.999").is_err());
/// assert!(Price::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Price(Decimal);

impl Price {
    /// Parse a price from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidFormat`] if the text does not match the
    /// two-decimal pattern or does not fit in a decimal.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        if !PRICE_RE.is_match(s) {
            return Err(PriceError::InvalidFormat);
        }

        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| PriceError::InvalidFormat)
    }

    /// Validate a price taken straight from a JSON payload.
    ///
    /// Only JSON numbers are accepted; the number's own string form is matched
    /// against the pattern, so `19.99` passes and `-1`, `1.999` or `1e3` fail.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Missing`] for `null`
    /// - [`PriceError::NotANumber`] for strings, booleans, arrays and objects
    /// - [`PriceError::InvalidFormat`] for numbers that break the pattern
    pub fn from_json(value: &Value) -> Result<Self, PriceError> {
        match value {
            Value::Null => Err(PriceError::Missing),
            Value::Number(n) => Self::parse(&n.to_string()),
            _ => Err(PriceError::NotANumber),
        }
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Prices go over the wire as JSON numbers, not strings.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
