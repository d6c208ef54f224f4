//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations, ratio scaling with a single
//! rounding step, and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use super::distribution::ValidationError;

/// Represents a monetary amount stored as paise (hundredths of a rupee)
///
/// Using i64 paise keeps every sum exact; only `checked_scale` rounds, half
/// away from zero. The `+`/`-` operators are for amounts already known to be
/// in range; totals over user input go through the checked methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use gstr_ledger::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from whole rupees
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in paise
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Get the whole rupees portion (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Get the paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by `numerator / denominator`, rounding once to the paisa
    ///
    /// Returns `None` when the denominator is zero or the result does not fit.
    ///
    /// # Examples
    /// ```
    /// use gstr_ledger::models::Money;
    /// // 12% markup
    /// let marked_up = Money::from_rupees(1000).checked_scale(112, 100);
    /// assert_eq!(marked_up, Some(Money::from_rupees(1120)));
    /// ```
    pub fn checked_scale(&self, numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let product = self.0 as i128 * numerator as i128;
        i64::try_from(div_round_half_away(product, denominator as i128))
            .ok()
            .map(Self)
    }

    /// Add, returning `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract, returning `None` on overflow
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Sum a sequence of amounts, returning `None` if any partial sum overflows
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |total, amount| total.checked_add(amount))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "Rs. 1,050.5", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, trimmed),
        };

        let rest = ["₹", "Rs.", "Rs", "$"]
            .iter()
            .find_map(|symbol| rest.strip_prefix(*symbol))
            .unwrap_or(rest)
            .trim();
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(trimmed.to_string()));
        }

        let rupees: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let paise: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|r| r.checked_add(paise))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.rupees().abs(), self.paise_part())
        } else {
            format!("{}{}.{:02}", symbol, self.rupees(), self.paise_part())
        }
    }
}

/// Integer division rounding half away from zero; `divisor` must be positive
fn div_round_half_away(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.abs() * 2 >= divisor.abs() {
        quotient + value.signum() * divisor.signum()
    } else {
        quotient
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.rupees().abs(), self.paise_part())
        } else {
            write!(f, "{}.{:02}", self.rupees(), self.paise_part())
        }
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Rounding granularity for distributed parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Precision {
    /// Whole rupees (0 decimal places)
    Whole,
    /// Paise (2 decimal places)
    #[default]
    Cents,
}

impl Precision {
    /// Size of one rounding step in paise
    pub const fn step(self) -> i64 {
        match self {
            Self::Whole => 100,
            Self::Cents => 1,
        }
    }

    /// Number of decimal places
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Whole => 0,
            Self::Cents => 2,
        }
    }
}

impl TryFrom<u8> for Precision {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Whole),
            2 => Ok(Self::Cents),
            other => Err(ValidationError::InvalidPrecision(other.to_string())),
        }
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        precision.decimals()
    }
}

impl FromStr for Precision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPrecision(s.trim().to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decimals())
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
