//! Closed calendar date ranges
//!
//! A `DateRange` covers every day from `start` to `end`, both inclusive.
//! Iteration is lazy and the range itself is `Copy`, so it can be walked any
//! number of times.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

use super::distribution::ValidationError;

/// Parse a calendar date given as `YYYY-MM-DD` or `DD/MM/YYYY`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

/// Inclusive range of calendar dates with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                from: start,
                to: end,
            });
        }
        Ok(Self { start, end })
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both ends
    pub fn day_count(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }

    /// Check whether a date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The leading `days` days of this range, or `None` if it is shorter
    pub fn leading(&self, days: i64) -> Option<Self> {
        if days < 1 || days > self.day_count() {
            return None;
        }
        let end = self.start.checked_add_days(chrono::Days::new((days - 1) as u64))?;
        Some(Self {
            start: self.start,
            end,
        })
    }

    /// Iterate the days of the range in ascending order
    pub fn iter(&self) -> DateIter {
        DateIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the days of a `DateRange`
#[derive(Debug, Clone)]
pub struct DateIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|day| *day <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(next) => (self.end.signed_duration_since(next).num_days() + 1).max(0) as usize,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateIter {}

impl FusedIterator for DateIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-30"), Some(date(2024, 1, 30)));
        assert_eq!(parse_date(" 30/01/2024 "), Some(date(2024, 1, 30)));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("tomorrow"), None);
    }

    #[test]
    fn test_day_count_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 30)).unwrap();
        assert_eq!(range.day_count(), 30);

        let single = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(single.day_count(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date(2024, 3, 10), date(2024, 3, 9)).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn test_iteration_crosses_month_and_leap_day() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 2)).unwrap();
        let days: Vec<_> = range.iter().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
    }

    #[test]
    fn test_iteration_is_restartable() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        let first: Vec<_> = range.iter().collect();
        let second: Vec<_> = range.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(range.iter().len(), 5);
    }

    #[test]
    fn test_iteration_is_lazy_and_fused() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let mut days = range.iter().skip(365);
        assert_eq!(days.next(), Some(date(2024, 12, 31)));
        assert_eq!(days.next(), None);
        assert_eq!(days.next(), None);
    }

    #[test]
    fn test_leading_days() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();
        let leading = range.leading(30).unwrap();
        assert_eq!(leading.end(), date(2024, 1, 30));
        assert!(range.leading(33).is_none());
        assert!(range.contains(date(2024, 2, 1)));
        assert!(!leading.contains(date(2024, 2, 1)));
    }
}
