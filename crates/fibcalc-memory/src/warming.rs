//! Pool warm-up strategies.
//!
//! Estimates the size classes a calculation will need from the target
//! Fibonacci index `N` and pre-populates the relevant pools so the first
//! few iterations of a hot loop don't pay allocation cost.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::pool::BigIntPool;

/// A predicted size class and how many buffers to pre-populate it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePrediction {
    /// Bit length to request from the pool (maps to a size class).
    pub bits: usize,
    /// Number of buffers to pre-populate.
    pub count: usize,
}

/// Configuration for a warm-up pass.
#[derive(Debug, Clone, Copy)]
pub struct WarmingConfig {
    /// Minimum number of buffers to pre-populate per predicted class.
    pub min_count: usize,
    /// Maximum number of buffers to pre-populate per predicted class.
    pub max_count: usize,
}

impl Default for WarmingConfig {
    fn default() -> Self {
        Self {
            min_count: 2,
            max_count: 6,
        }
    }
}

/// Estimate the bit length of `F(n)`.
///
/// `F(n)` has roughly `n * log2(phi)` bits; `log2(phi) ≈ 0.694_24`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn estimate_result_bits(n: u64) -> usize {
    const LOG2_PHI: f64 = 0.694_241_913_63;
    ((n as f64) * LOG2_PHI).ceil() as usize + 1
}

/// Predict the size classes and buffer counts a calculation for `F(n)`
/// will need, scaling the count with magnitude within `config`'s bounds.
#[must_use]
pub fn predict_sizes(n: u64, config: &WarmingConfig) -> Vec<SizePrediction> {
    let result_bits = estimate_result_bits(n);

    // The doubling recurrence touches values from roughly half the final
    // bit length up to the final bit length; warm both ends plus the
    // intermediate products, which can be up to twice as wide.
    let classes = [result_bits / 2, result_bits, result_bits * 2];

    classes
        .into_iter()
        .filter(|&bits| bits > 0)
        .map(|bits| SizePrediction {
            bits,
            count: scale_count(bits, config),
        })
        .collect()
}

/// Larger operands get more pre-populated buffers, up to `config.max_count`.
fn scale_count(bits: usize, config: &WarmingConfig) -> usize {
    let magnitude_bonus = (bits / 1_000_000).min(config.max_count - config.min_count);
    config.min_count + magnitude_bonus
}

/// Warm `pool` using a custom configuration.
pub fn warm_pool(pool: &BigIntPool, n: u64, config: &WarmingConfig) {
    for prediction in predict_sizes(n, config) {
        pool.warm(prediction.bits, prediction.count);
    }
}

/// Warm `pool` using default bounds, guaranteeing the warm-up only runs
/// once per pool across the process via `already_warmed`.
pub fn warm_pool_default(pool: &BigIntPool, n: u64, already_warmed: &AtomicBool) {
    if already_warmed
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return;
    }
    warm_pool(pool, n, &WarmingConfig::default());
}
