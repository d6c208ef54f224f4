//! Amount distributor
//!
//! Splits a tax-adjusted sale total into `TOTAL_BUCKETS` parts spread over
//! consecutive days, `BUCKETS_PER_DAY` per day. Each part but the last is a
//! random draw around the even share of what is left; the last part takes the
//! remainder, so the parts always sum to the adjusted total exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::distribution::{
    DistributionEntry, DistributionRequest, DistributionResult, RangePolicy, ValidationError,
    BUCKETS_PER_DAY, REQUIRED_DAYS, TOTAL_BUCKETS,
};
use crate::models::{DateRange, Money, Precision};

/// Source of random fractions in `[0, 1)`
pub trait PartSource {
    fn next_fraction(&mut self) -> f64;
}

/// `PartSource` backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSource<StdRng> {
    /// Reproducible source: the same seed yields the same draws
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PartSource for RandomSource<R> {
    fn next_fraction(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// `PartSource` that cycles through a fixed list of fractions
#[derive(Debug, Clone)]
pub struct FixedSource {
    fractions: Vec<f64>,
    position: usize,
}

impl FixedSource {
    /// An empty list behaves like a list holding `0.0`
    pub fn new(fractions: Vec<f64>) -> Self {
        Self {
            fractions,
            position: 0,
        }
    }

    /// Always returns the same fraction
    pub fn constant(fraction: f64) -> Self {
        Self::new(vec![fraction])
    }
}

impl PartSource for FixedSource {
    fn next_fraction(&mut self) -> f64 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let value = self.fractions[self.position % self.fractions.len()];
        self.position += 1;
        value
    }
}

/// Distributor settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributionConfig {
    pub precision: Precision,
    pub range_policy: RangePolicy,
}

/// Splits sale totals into dated buckets
#[derive(Debug, Clone, Copy, Default)]
pub struct Distributor {
    config: DistributionConfig,
}

impl Distributor {
    pub fn new(config: DistributionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> DistributionConfig {
        self.config
    }

    /// Days that will receive buckets, or why the range cannot hold them
    pub fn bucket_span(&self, range: DateRange) -> Result<DateRange, ValidationError> {
        let available = range.day_count();
        if available < REQUIRED_DAYS {
            return Err(ValidationError::InsufficientDays {
                available,
                required: REQUIRED_DAYS,
            });
        }
        if available > REQUIRED_DAYS && self.config.range_policy == RangePolicy::Exact {
            return Err(ValidationError::RangeTooLong {
                available,
                required: REQUIRED_DAYS,
            });
        }
        range
            .leading(REQUIRED_DAYS)
            .ok_or(ValidationError::InsufficientDays {
                available,
                required: REQUIRED_DAYS,
            })
    }

    /// Distribute the request's adjusted total over its date range
    ///
    /// All validation happens before the first draw from `source`.
    pub fn distribute(
        &self,
        request: &DistributionRequest,
        source: &mut dyn PartSource,
    ) -> Result<DistributionResult, ValidationError> {
        let span = self.bucket_span(request.range())?;
        let adjusted_total = request.adjusted_total();

        let parts = split_parts(adjusted_total, TOTAL_BUCKETS, self.config.precision, source);

        let entries = span
            .iter()
            .flat_map(|date| std::iter::repeat(date).take(BUCKETS_PER_DAY))
            .zip(parts)
            .map(|(date, amount)| DistributionEntry { date, amount })
            .collect();

        Ok(DistributionResult {
            span,
            total_amount: request.total_amount(),
            adjusted_total,
            precision: self.config.precision,
            entries,
        })
    }
}

/// Split `total` into `count` non-negative parts that sum to it exactly
///
/// Part `i` of the `k` still to assign is a draw from `[0, 2 * remaining / k)`
/// rounded to the precision step and capped so `remaining` never goes
/// negative. The final part is the remainder and may carry sub-step paise.
pub fn split_parts(
    total: Money,
    count: usize,
    precision: Precision,
    source: &mut dyn PartSource,
) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }

    let step = precision.step();
    let mut parts = Vec::with_capacity(count);
    let mut remaining = total.paise().max(0);

    for index in 0..count - 1 {
        let parts_left = (count - index) as f64;
        let fraction = source.next_fraction();
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let drawn = fraction * 2.0 * remaining as f64 / parts_left;
        let rounded = (drawn / step as f64).round() as i64 * step;
        let ceiling = remaining - remaining % step;
        let value = rounded.clamp(0, ceiling);

        parts.push(Money::from_paise(value));
        remaining -= value;
    }

    parts.push(Money::from_paise(remaining));
    parts
}
