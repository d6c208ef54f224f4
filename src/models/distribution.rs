//! Sale distribution model
//!
//! A distribution spreads one tax-adjusted sale total across a fixed number
//! of daily buckets. This module holds the request and result types and the
//! validation rules a request must pass before any random draw is made.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::date_range::{parse_date, DateRange};
use super::money::{Money, Precision};

/// Number of buckets a distribution always produces
pub const TOTAL_BUCKETS: usize = 300;

/// Buckets assigned to each calendar day
pub const BUCKETS_PER_DAY: usize = 10;

/// Days needed to hold every bucket
pub const REQUIRED_DAYS: i64 = (TOTAL_BUCKETS / BUCKETS_PER_DAY) as i64;

/// Markup applied before distributing, in basis points (12%)
pub const MARKUP_BPS: i64 = 1200;

/// Deduction applied after the markup, in basis points (4%)
pub const DEDUCTION_BPS: i64 = 400;

/// Reasons a distribution request is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is not a valid amount: {value}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Total amount must be greater than zero")]
    NonPositiveAmount,

    #[error("{field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("From date {from} is after to date {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },

    #[error("Date range covers {available} days but {required} are needed")]
    InsufficientDays { available: i64, required: i64 },

    #[error("Date range covers {available} days but exactly {required} are allowed")]
    RangeTooLong { available: i64, required: i64 },

    #[error("Precision must be 0 or 2, got '{0}'")]
    InvalidPrecision(String),
}

/// Field-free classification of a `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    MissingField,
    InvalidAmount,
    NonPositiveAmount,
    InvalidDate,
    InvertedRange,
    InsufficientDays,
    RangeTooLong,
    InvalidPrecision,
}

impl ValidationError {
    /// The kind of failure, without its payload
    pub fn kind(&self) -> ValidationKind {
        match self {
            Self::MissingField(_) => ValidationKind::MissingField,
            Self::InvalidAmount { .. } => ValidationKind::InvalidAmount,
            Self::NonPositiveAmount => ValidationKind::NonPositiveAmount,
            Self::InvalidDate { .. } => ValidationKind::InvalidDate,
            Self::InvertedRange { .. } => ValidationKind::InvertedRange,
            Self::InsufficientDays { .. } => ValidationKind::InsufficientDays,
            Self::RangeTooLong { .. } => ValidationKind::RangeTooLong,
            Self::InvalidPrecision(_) => ValidationKind::InvalidPrecision,
        }
    }
}

/// How ranges longer than the required number of days are treated
///
/// `Leading` is how the sale entry form has always behaved: buckets fill the
/// first 30 days and any later days get nothing. `Exact` is the strict
/// 30-day contract, where a longer range is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Use the leading days from the start date and ignore the rest
    #[default]
    Leading,
    /// Only accept ranges of exactly the required length
    Exact,
}

impl FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" => Ok(Self::Leading),
            "exact" => Ok(Self::Exact),
            other => Err(format!(
                "unknown range policy '{}', expected 'leading' or 'exact'",
                other
            )),
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading => write!(f, "leading"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Raw, unvalidated distribution input as typed into a form or command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionInput {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DistributionInput {
    pub fn new(
        amount: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            amount: Some(amount.into()),
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Validate the raw fields into a request
    ///
    /// Fields are checked in order amount, from, to; the first problem found
    /// is reported. Blank strings count as missing.
    pub fn validate(&self) -> Result<DistributionRequest, ValidationError> {
        let amount_raw = present(&self.amount).ok_or(ValidationError::MissingField("amount"))?;
        let from_raw = present(&self.from).ok_or(ValidationError::MissingField("from date"))?;
        let to_raw = present(&self.to).ok_or(ValidationError::MissingField("to date"))?;

        let amount = Money::parse(amount_raw).map_err(|_| ValidationError::InvalidAmount {
            field: "amount",
            value: amount_raw.to_string(),
        })?;
        let from = parse_date(from_raw).ok_or_else(|| ValidationError::InvalidDate {
            field: "from date",
            value: from_raw.to_string(),
        })?;
        let to = parse_date(to_raw).ok_or_else(|| ValidationError::InvalidDate {
            field: "to date",
            value: to_raw.to_string(),
        })?;

        DistributionRequest::new(amount, from, to)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A validated request: positive amount and an ordered date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionRequest {
    total_amount: Money,
    adjusted_total: Money,
    range: DateRange,
}

impl DistributionRequest {
    /// Create a request, rejecting non-positive amounts and inverted ranges
    ///
    /// An amount whose adjusted total does not fit in `Money` is rejected as
    /// an invalid amount.
    pub fn new(
        total_amount: Money,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if !total_amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount);
        }
        let adjusted_total =
            adjusted_total(total_amount).ok_or_else(|| ValidationError::InvalidAmount {
                field: "amount",
                value: total_amount.to_string(),
            })?;
        let range = DateRange::new(from, to)?;
        Ok(Self {
            total_amount,
            adjusted_total,
            range,
        })
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn from_date(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn to_date(&self) -> NaiveDate {
        self.range.end()
    }

    /// The amount actually distributed: total with the markup then the deduction
    pub fn adjusted_total(&self) -> Money {
        self.adjusted_total
    }
}

/// `amount * 1.12 * 0.96`, rounded once to the paisa; `None` if it overflows
pub fn adjusted_total(amount: Money) -> Option<Money> {
    let markup = 10_000 + MARKUP_BPS;
    let deduction = 10_000 - DEDUCTION_BPS;
    amount.checked_scale(markup * deduction, 10_000 * 10_000)
}

/// Largest amount, in paise, whose adjusted total still fits in `Money`
pub const MAX_AMOUNT_PAISE: i64 = 8_578_285_004_515_230_475;

/// One bucket of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Sum of the entries sharing one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub amount: Money,
    pub entry_count: usize,
}

/// Ordered distribution output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionResult {
    /// Days that received buckets
    pub span: DateRange,
    pub total_amount: Money,
    pub adjusted_total: Money,
    pub precision: Precision,
    pub entries: Vec<DistributionEntry>,
}

impl DistributionResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry; equals `adjusted_total`
    pub fn grand_total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Consecutive entries grouped by date, in order
    pub fn day_totals(&self) -> Vec<DayTotal> {
        self.entries
            .chunk_by(|a, b| a.date == b.date)
            .map(|group| DayTotal {
                date: group[0].date,
                amount: group.iter().map(|e| e.amount).sum(),
                entry_count: group.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_adjusted_total() {
        assert_eq!(
            adjusted_total(Money::from_rupees(10_000)),
            Some(Money::from_rupees(10_752))
        );
        assert_eq!(adjusted_total(Money::from_rupees(500)), Some(Money::from_paise(53_760)));
        // 999.99 * 1.0752 = 1075.189248
        assert_eq!(adjusted_total(Money::from_paise(99_999)), Some(Money::from_paise(107_519)));
    }

    #[test]
    fn test_amount_limit() {
        let from = date(2024, 1, 1);
        let to = date(2024, 1, 30);

        let largest = DistributionRequest::new(Money::from_paise(MAX_AMOUNT_PAISE), from, to)
            .unwrap();
        assert_eq!(largest.adjusted_total(), Money::from_paise(i64::MAX));

        let too_large = Money::from_paise(MAX_AMOUNT_PAISE + 1);
        assert_eq!(
            DistributionRequest::new(too_large, from, to).unwrap_err(),
            ValidationError::InvalidAmount {
                field: "amount",
                value: too_large.to_string(),
            }
        );
    }

    #[test]
    fn test_oversized_input_rejected() {
        // parses to 9e18 paise, whose adjusted total overflows
        let input = DistributionInput::new("90000000000000000", "2024-01-01", "2024-01-30");
        assert_eq!(input.validate().unwrap_err().kind(), ValidationKind::InvalidAmount);
    }

    #[test]
    fn test_valid_input() {
        let request = DistributionInput::new("10000", "2024-01-01", "2024-01-30")
            .validate()
            .unwrap();
        assert_eq!(request.total_amount(), Money::from_rupees(10_000));
        assert_eq!(request.from_date(), date(2024, 1, 1));
        assert_eq!(request.range().day_count(), 30);
    }

    #[test]
    fn test_missing_fields() {
        let mut input = DistributionInput::new("10000", "2024-01-01", "2024-01-30");
        input.to = None;
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::MissingField("to date")
        );

        input.amount = Some("   ".into());
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::MissingField("amount")
        );

        assert_eq!(
            DistributionInput::default().validate().unwrap_err().kind(),
            ValidationKind::MissingField
        );
    }

    #[test]
    fn test_non_positive_amount() {
        let zero = DistributionInput::new("0", "2024-01-01", "2024-02-01");
        assert_eq!(zero.validate().unwrap_err(), ValidationError::NonPositiveAmount);

        let negative = DistributionInput::new("-5", "2024-01-01", "2024-02-01");
        assert_eq!(
            negative.validate().unwrap_err(),
            ValidationError::NonPositiveAmount
        );
    }

    #[test]
    fn test_invalid_values() {
        let bad_amount = DistributionInput::new("ten", "2024-01-01", "2024-02-01");
        assert_eq!(
            bad_amount.validate().unwrap_err().kind(),
            ValidationKind::InvalidAmount
        );

        let bad_date = DistributionInput::new("100", "2024-13-01", "2024-02-01");
        assert_eq!(
            bad_date.validate().unwrap_err().kind(),
            ValidationKind::InvalidDate
        );
    }

    #[test]
    fn test_inverted_range() {
        let input = DistributionInput::new("500", "2024-03-10", "2024-03-09");
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::InvertedRange {
                from: date(2024, 3, 10),
                to: date(2024, 3, 9),
            }
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let input = DistributionInput::new("0", "2024-03-10", "2024-03-09");
        let first = input.validate().unwrap_err();
        let second = input.validate().unwrap_err();
        assert_eq!(first.kind(), second.kind());
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_totals_group_consecutive_dates() {
        let entry = |day, paise| DistributionEntry {
            date: day,
            amount: Money::from_paise(paise),
        };
        let entries = vec![
            entry(date(2024, 1, 1), 100),
            entry(date(2024, 1, 1), 250),
            entry(date(2024, 1, 2), 50),
        ];
        let result = DistributionResult {
            span: DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap(),
            total_amount: Money::from_paise(370),
            adjusted_total: Money::from_paise(400),
            precision: Precision::Cents,
            entries,
        };

        let totals = result.day_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].amount.paise(), 350);
        assert_eq!(totals[0].entry_count, 2);
        assert_eq!(totals[1].amount.paise(), 50);
        assert_eq!(result.grand_total().paise(), 400);
    }

    #[test]
    fn test_range_policy_parse() {
        assert_eq!("Exact".parse::<RangePolicy>().unwrap(), RangePolicy::Exact);
        assert_eq!("leading".parse::<RangePolicy>().unwrap(), RangePolicy::Leading);
        assert!("loose".parse::<RangePolicy>().is_err());
        assert_eq!(RangePolicy::default(), RangePolicy::Leading);
    }
}
