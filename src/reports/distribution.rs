//! Bucket distribution
//!
//! Spreads one aggregate total across a fixed number of buckets (months by
//! default) so that a trend chart has a plausible shape. Every bucket but the
//! last deviates randomly from the even share by up to the variance ratio;
//! the last bucket takes whatever is left, so the buckets always add back up
//! to the input total.
//!
//! The random source is a trait object so tests can pin it with a seed.

use chrono::Month;
use serde::Serialize;

use crate::config::DistributionSettings;
use crate::models::numeric::{finite_or_zero, round_half_up};

/// Source of uniform samples in `[0, 1)`
pub trait VarianceSource {
    fn next_unit(&mut self) -> f64;
}

/// Deterministic xorshift64* generator
#[derive(Debug, Clone)]
pub struct SeededVariance {
    state: u64,
}

impl SeededVariance {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl VarianceSource for SeededVariance {
    fn next_unit(&mut self) -> f64 {
        const DENOM: f64 = (1_u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 / DENOM
    }
}

/// Generator seeded from operating-system entropy
#[derive(Debug, Clone)]
pub struct SystemVariance(SeededVariance);

impl SystemVariance {
    pub fn new() -> Self {
        let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
        Self(SeededVariance::new(high ^ low.rotate_left(32)))
    }
}

impl Default for SystemVariance {
    fn default() -> Self {
        Self::new()
    }
}

impl VarianceSource for SystemVariance {
    fn next_unit(&mut self) -> f64 {
        self.0.next_unit()
    }
}

/// Buckets produced for one total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionResult {
    /// The (coerced) total that was distributed
    pub total: f64,
    pub buckets: Vec<f64>,
}

impl DistributionResult {
    pub fn sum(&self) -> f64 {
        self.buckets.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Pair each bucket with a month label, starting at `start`
    pub fn by_month(&self, start: Month) -> Vec<(String, f64)> {
        monthly_labels(start, self.buckets.len())
            .into_iter()
            .zip(self.buckets.iter().copied())
            .collect()
    }
}

/// Splits totals into a fixed number of buckets
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionAllocator {
    bucket_count: usize,
    variance_ratio: f64,
}

/// Default number of buckets, one per month
pub const DEFAULT_BUCKETS: usize = 12;

/// Default maximum deviation from the even share
pub const DEFAULT_VARIANCE: f64 = 0.2;

impl Default for DistributionAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS)
    }
}

impl DistributionAllocator {
    pub fn new(bucket_count: usize) -> Self {
        Self {
            bucket_count,
            variance_ratio: DEFAULT_VARIANCE,
        }
    }

    /// Set the variance ratio, clamped to `[0, 1]`
    pub fn with_variance(mut self, ratio: f64) -> Self {
        self.variance_ratio = finite_or_zero(ratio).clamp(0.0, 1.0);
        self
    }

    pub fn from_settings(settings: &DistributionSettings) -> Self {
        Self::new(settings.bucket_count).with_variance(settings.variance_ratio)
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn variance_ratio(&self) -> f64 {
        self.variance_ratio
    }

    /// Distribute `total` across the configured number of buckets
    ///
    /// Non-positive or non-finite totals produce all-zero buckets without
    /// drawing from `source`. Each leading bucket is rounded to a whole number
    /// and capped at what is still unallocated; the last bucket receives the
    /// remainder.
    pub fn distribute(&self, total: f64, source: &mut dyn VarianceSource) -> DistributionResult {
        let n = self.bucket_count;
        let coerced = finite_or_zero(total);

        if coerced < 0.0 {
            tracing::warn!(total, "negative total cannot be distributed, using zero");
        }
        if coerced <= 0.0 || n == 0 {
            return DistributionResult {
                total: coerced.max(0.0),
                buckets: vec![0.0; n],
            };
        }

        let base = coerced / n as f64;
        let mut buckets = Vec::with_capacity(n);
        let mut remaining = coerced;

        for _ in 0..n - 1 {
            let factor = 1.0 + (source.next_unit() * 2.0 - 1.0) * self.variance_ratio;
            let value = round_half_up((base * factor).max(0.0)).min(remaining).max(0.0);
            remaining -= value;
            buckets.push(value);
        }

        let allocated: f64 = buckets.iter().sum();
        buckets.push((coerced - allocated).max(0.0));

        tracing::debug!(total = coerced, buckets = n, "distributed total");

        DistributionResult {
            total: coerced,
            buckets,
        }
    }
}

/// Distribute with an explicit bucket count and the default variance
pub fn distribute(total: f64, buckets: usize, source: &mut dyn VarianceSource) -> DistributionResult {
    DistributionAllocator::new(buckets).distribute(total, source)
}

/// Three-letter month labels for `count` consecutive buckets, wrapping at December
pub fn monthly_labels(start: Month, count: usize) -> Vec<String> {
    let mut month = start;
    let mut labels = Vec::with_capacity(count);
    for _ in 0..count {
        labels.push(month.name()[..3].to_string());
        month = month.succ();
    }
    labels
}
