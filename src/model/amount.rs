//! Amount type for handling monetary values with optional rupee signs.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may arrive as JSON numbers or as strings that may or may not include a
//! rupee sign and commas.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::debug;

const RUPEE: char = '₹';

/// Represents how rupee amounts were (or should be) formatted.
///
/// # Examples
///  - `AmountFormat{ symbol: true, commas: true }` -> `₹60,000.00`
///  - `AmountFormat{ symbol: false, commas: true }` -> `60,000.00`
///  - `AmountFormat{ symbol: false, commas: false }` -> `60000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    /// Whether a rupee sign is present in the formatting.
    symbol: bool,
    /// Whether commas are present as thousands separators in the formatting.
    commas: bool,
}

impl AmountFormat {
    /// A bare number, which is how the backend sends amounts: e.g. `60000.5`.
    pub const PLAIN: AmountFormat = AmountFormat {
        symbol: false,
        commas: false,
    };
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// The default format has a rupee sign and commas: e.g. `₹60,000.00`.
const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    symbol: true,
    commas: true,
};

/// Represents a monetary amount in the base currency unit.
///
/// Formatting is considered significant for the purposes of equality, so for numeric comparisons,
/// you should access the `Decimal` value and use that.
///
/// # Examples
///
/// ```
/// # use expert_wallet::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("5000").unwrap();
/// let b = Amount::from_str("₹5,000.00").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.value(), b.value());
/// assert_eq!(b.to_string(), "₹5,000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    /// The parsed numerical value.
    value: Decimal,
    /// The way the numerical value was parsed from, or should be written to, a `String`.
    format: AmountFormat,
}

impl Amount {
    /// Creates a new Amount from a Decimal value with default `String` formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    /// Creates a new Amount from a Decimal value with the specified formatting.
    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns the same value rendered with the rupee sign and commas.
    pub fn with_default_format(&self) -> Self {
        Self::new(self.value)
    }

    /// Reads an amount from an arbitrary JSON value. Numbers and numeric strings are parsed,
    /// anything else (absent, `null`, booleans, garbage text) is zero.
    pub(crate) fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => match decimal_from_number_str(&n.to_string()) {
                Some(d) => Amount::new_with_format(d, AmountFormat::PLAIN),
                None => {
                    debug!("Treating unrepresentable amount {n} as zero");
                    Amount::zero()
                }
            },
            Some(serde_json::Value::String(s)) => Amount::from_str(s).unwrap_or_else(|e| {
                debug!("Treating non-numeric amount '{s}' as zero: {e}");
                Amount::zero()
            }),
            _ => Amount::zero(),
        }
    }

    /// Zero in the plain format.
    pub fn zero() -> Self {
        Amount::new_with_format(Decimal::ZERO, AmountFormat::PLAIN)
    }
}

/// A serde `deserialize_with` helper which never fails. See `Amount::from_json`.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(Amount::from_json(value.as_ref()))
}

fn decimal_from_number_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::zero());
        }

        let (symbol, without_symbol) = match trimmed.strip_prefix(RUPEE) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        // Remove commas (thousand separators)
        let without_commas = without_symbol.replace(',', "");
        let commas = without_commas.len() < without_symbol.len();

        let value = Decimal::from_str(&without_commas)
            .or_else(|e| Decimal::from_scientific(&without_commas).map_err(|_| e))
            .map_err(AmountError)?;
        Ok(Amount {
            value,
            format: AmountFormat { symbol, commas },
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.value().is_sign_negative() && !self.is_zero() {
            ("-", self.value().abs())
        } else {
            ("", self.value())
        };

        let sym = if self.format.symbol {
            String::from(RUPEE)
        } else {
            String::new()
        };

        if self.format.commas {
            write!(
                f,
                "{sign}{sym}{}",
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            write!(f, "{sign}{sym}{}", num.normalize())
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::new_with_format(Decimal::from(v), AmountFormat::PLAIN))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::new_with_format(Decimal::from(v), AmountFormat::PLAIN))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        let value = Decimal::try_from(v).map_err(E::custom)?;
        Ok(Amount::new_with_format(value, AmountFormat::PLAIN))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_with_rupee_sign() {
        let amount = Amount::from_str("₹50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_without_rupee_sign() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
        assert_eq!(amount.to_string(), "50");
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("₹1,23,456.50").unwrap();
        assert_eq!(amount.value(), dec("123456.50"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn test_display_default_format() {
        let amount = Amount::new(dec("60000"));
        assert_eq!(amount.to_string(), "₹60,000.00");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::new(dec("-50"));
        assert_eq!(amount.to_string(), "-₹50.00");
    }

    #[test]
    fn test_deserialize_number() {
        let amount: Amount = serde_json::from_str("1499").unwrap();
        assert_eq!(amount.value(), dec("1499"));
        let amount: Amount = serde_json::from_str("99.5").unwrap();
        assert_eq!(amount.value(), dec("99.5"));
    }

    #[test]
    fn test_deserialize_string() {
        let amount: Amount = serde_json::from_str("\"₹2,000\"").unwrap();
        assert_eq!(amount.value(), dec("2000"));
    }

    #[test]
    fn test_serialize_plain() {
        let amount: Amount = serde_json::from_str("250").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"250\"");
    }

    #[test]
    fn test_from_json_lenient() {
        assert_eq!(Amount::from_json(Some(&json!(100))).value(), dec("100"));
        assert_eq!(Amount::from_json(Some(&json!("42.5"))).value(), dec("42.5"));
        assert!(Amount::from_json(Some(&json!("n/a"))).is_zero());
        assert!(Amount::from_json(Some(&json!(null))).is_zero());
        assert!(Amount::from_json(Some(&json!(true))).is_zero());
        assert!(Amount::from_json(None).is_zero());
    }

    #[test]
    fn test_equality_is_format_sensitive() {
        let a1 = Amount::from_str("₹50").unwrap();
        let a2 = Amount::from_str("50").unwrap();
        assert_ne!(a1, a2);
        assert_eq!(a1.value(), a2.value());
    }
}
