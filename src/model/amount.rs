//! Amount type for handling monetary values with an optional currency symbol.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a naira sign and commas.

use crate::model::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The number of decimal places kept for a currency amount (minor units).
pub const MINOR_UNIT_PLACES: u32 = 2;

/// Represents how amounts were (or should be) formatted.
///
/// # Examples
///  - `AmountFormat{ symbol: true, commas: true }` -> `-₦60,000.00`
///  - `AmountFormat{ symbol: false, commas: true }` -> `-60,000.00`
///  - `AmountFormat{ symbol: false, commas: false }` -> `-60000.00`
///  - `AmountFormat{ symbol: true, commas: false }` -> `-₦60000.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AmountFormat {
    /// Whether the currency symbol is present in the formatting.
    pub symbol: bool,
    /// Whether commas are present as thousands separators in the formatting.
    pub commas: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// The default format has a currency symbol and no commas: e.g. `-₦60000.00`.
const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    symbol: true,
    commas: false,
};

/// Represents a monetary amount in the single supported currency.
///
/// Formatting is considered significant for the purposes of equality, so for numeric comparisons,
/// you should access the `Decimal` value and use that.
///
/// # Examples
///
/// Parsing with the currency symbol:
/// ```
/// # use txn_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-₦45.50").unwrap();
/// assert_eq!(amount.to_string(), "-₦45.50");
/// ```
///
/// Parsing without the currency symbol:
/// ```
/// # use txn_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-45.5").unwrap();
/// assert_eq!(amount.to_string(), "-45.50");
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

    /// Creates an Amount from a count of minor units, e.g. `-4550` is `-₦45.50`.
    pub fn from_minor(minor: i64) -> Self {
        Self::new(Decimal::new(minor, MINOR_UNIT_PLACES))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn format(&self) -> AmountFormat {
        self.format
    }

    /// Returns the same value written with `format`.
    pub fn with_format(self, format: AmountFormat) -> Self {
        Self { format, ..self }
    }

    /// Returns `-abs(value)` rounded to minor units, keeping the default format. Amounts entered
    /// through the add flow are always expenses.
    pub fn to_expense(self) -> Self {
        let rounded = self
            .value
            .abs()
            .round_dp_with_strategy(MINOR_UNIT_PLACES, RoundingStrategy::MidpointAwayFromZero);
        Self::new(-rounded)
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub enum AmountError {
    Empty,
    /// Digit separators other than well-placed thousands commas, e.g. `1,5` or `1_000`.
    Separators(String),
    Decimal(rust_decimal::Error),
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => f.write_str("Empty"),
            AmountError::Separators(s) => write!(f, "Separators({s:?})"),
            AmountError::Decimal(e) => Debug::fmt(e, f),
        }
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => f.write_str("An amount cannot be empty"),
            AmountError::Separators(s) => write!(f, "Misplaced digit separators in '{s}'"),
            AmountError::Decimal(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AmountError::Empty | AmountError::Separators(_) => None,
            AmountError::Decimal(e) => Some(e),
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = Currency::Ngn.symbol();
        let mut symbol_present = false;

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        // Remove the currency symbol if present
        let without_symbol = if let Some(after_minus) = trimmed.strip_prefix('-') {
            if let Some(after_symbol) = after_minus.strip_prefix(symbol) {
                symbol_present = true;
                format!("-{after_symbol}")
            } else {
                trimmed.to_string()
            }
        } else if let Some(after_symbol) = trimmed.strip_prefix(symbol) {
            symbol_present = true;
            after_symbol.to_string()
        } else {
            trimmed.to_string()
        };

        let without_commas = strip_thousands_commas(&without_symbol)
            .ok_or_else(|| AmountError::Separators(trimmed.to_string()))?;
        let commas = without_commas.len() < without_symbol.len();

        let value = Decimal::from_str(&without_commas)
            .or_else(|_| Decimal::from_scientific(&without_commas))
            .map_err(AmountError::Decimal)?;
        Ok(Amount {
            value,
            format: AmountFormat {
                symbol: symbol_present,
                commas,
            },
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value().abs();
        let sym = if self.format.symbol {
            Currency::Ngn.symbol()
        } else {
            ""
        };

        if self.format.commas {
            write!(f, "{sign}{sym}{}", group_thousands(&format!("{num:.2}")))
        } else {
            write!(f, "{sign}{sym}{num:.2}")
        }
    }
}

/// Removes thousands commas from a signed number. Returns `None` for `_` anywhere, or for a comma
/// that does not sit between groups of three integer digits.
fn strip_thousands_commas(s: &str) -> Option<String> {
    if s.contains('_') {
        return None;
    }
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let int_end = unsigned
        .find(|c: char| !c.is_ascii_digit() && c != ',')
        .unwrap_or(unsigned.len());
    let (int_part, rest) = unsigned.split_at(int_end);
    if rest.contains(',') {
        return None;
    }
    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || !groups.all(|g| g.len() == 3) {
        return None;
    }
    Some(s.replace(',', ""))
}

/// Inserts commas into the integer part of an unsigned decimal string, e.g. `60000.00`.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
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
