//! Dynamic threshold management with ring buffer and hysteresis.
//!
//! Every 5 recorded iterations (once at least 3 metrics exist), `maybe_adjust`
//! partitions the ring buffer into "used the optimisation" vs. "did not",
//! compares their average time-per-bit, and nudges the FFT/parallel
//! thresholds toward whichever side is winning. A 15% hysteresis margin
//! must be cleared before any change commits, and each threshold is clamped
//! between a floor and a ceiling relative to its starting value.

use crate::constants::{
    DEFAULT_FFT_THRESHOLD, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_STRASSEN_THRESHOLD,
};
use crate::threshold_types::{
    DynamicThresholdConfig, IterationMetric, PartitionStats, ThresholdAdjustment,
    ThresholdSnapshot, ThresholdStats,
};

/// Iterations between adjustment attempts.
const ADJUST_EVERY: usize = 5;
/// Minimum metrics required before an adjustment is attempted.
const MIN_METRICS_FOR_ADJUST: usize = 3;

/// Ratio above which FFT is considered worth enabling more aggressively.
const FFT_ENABLE_TARGET: f64 = 1.2;
/// Ratio above which parallel execution is considered worth enabling more aggressively.
const PARALLEL_ENABLE_TARGET: f64 = 1.1;

/// Factor applied to lower the FFT threshold when FFT is paying off.
const FFT_LOWER_FACTOR: f64 = 0.9;
/// Factor applied to raise the FFT threshold when FFT is not paying off.
const FFT_RAISE_FACTOR: f64 = 1.1;
/// Factor applied to lower the parallel threshold when parallelism is paying off.
const PARALLEL_LOWER_FACTOR: f64 = 0.8;
/// Factor applied to raise the parallel threshold when parallelism is not paying off.
const PARALLEL_RAISE_FACTOR: f64 = 1.2;

/// Margin that must separate a ratio from its target before a change commits.
const HYSTERESIS_MARGIN: f64 = 0.15;

/// Floor for the FFT threshold, in bits.
const FFT_THRESHOLD_FLOOR: usize = 100_000;
/// Floor for the parallel threshold, in bits.
const PARALLEL_THRESHOLD_FLOOR: usize = 1024;
/// Ceiling multiplier for the FFT threshold, relative to its starting value.
const FFT_CEILING_MULTIPLIER: usize = 2;
/// Ceiling multiplier for the parallel threshold, relative to its starting value.
const PARALLEL_CEILING_MULTIPLIER: usize = 4;

/// Manager for dynamically adjusting multiplication thresholds.
pub struct DynamicThresholdManager {
    config: DynamicThresholdConfig,
    metrics: Vec<IterationMetric>,
    ring_pos: usize,
    ring_full: bool,
    iterations_since_adjust: usize,
    current_parallel: usize,
    current_fft: usize,
    current_strassen: usize,
    fft_floor: usize,
    fft_ceiling: usize,
    parallel_floor: usize,
    parallel_ceiling: usize,
    adjustment_count: usize,
    adjustment_history: Vec<ThresholdAdjustment>,
}

impl DynamicThresholdManager {
    /// Create a new threshold manager with the given configuration, starting
    /// from the compiled-in default thresholds.
    #[must_use]
    pub fn new(config: DynamicThresholdConfig) -> Self {
        Self::with_starting_thresholds(
            config,
            DEFAULT_FFT_THRESHOLD,
            DEFAULT_PARALLEL_THRESHOLD,
            DEFAULT_STRASSEN_THRESHOLD,
        )
    }

    /// Create a manager whose floor/ceiling bounds are derived from the given
    /// starting thresholds, as required when those thresholds come from a
    /// calibration profile rather than the compiled-in defaults.
    #[must_use]
    pub fn with_starting_thresholds(
        config: DynamicThresholdConfig,
        starting_fft: usize,
        starting_parallel: usize,
        starting_strassen: usize,
    ) -> Self {
        let ring_size = config.ring_buffer_size;
        Self {
            config,
            metrics: Vec::with_capacity(ring_size),
            ring_pos: 0,
            ring_full: false,
            iterations_since_adjust: 0,
            current_parallel: starting_parallel,
            current_fft: starting_fft,
            current_strassen: starting_strassen,
            fft_floor: FFT_THRESHOLD_FLOOR,
            fft_ceiling: starting_fft.saturating_mul(FFT_CEILING_MULTIPLIER),
            parallel_floor: PARALLEL_THRESHOLD_FLOOR,
            parallel_ceiling: starting_parallel.saturating_mul(PARALLEL_CEILING_MULTIPLIER),
            adjustment_count: 0,
            adjustment_history: Vec::new(),
        }
    }

    /// Record a metric from an iteration.
    ///
    /// Called from the single thread running the doubling loop, so no lock
    /// is needed on the write path.
    pub fn record(&mut self, metric: IterationMetric) {
        let ring_size = self.config.ring_buffer_size;
        if self.metrics.len() < ring_size {
            self.metrics.push(metric);
        } else {
            self.metrics[self.ring_pos] = metric;
            self.ring_full = true;
        }
        self.ring_pos = (self.ring_pos + 1) % ring_size;
        self.iterations_since_adjust += 1;
    }

    /// Get the number of recorded metrics.
    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Run an adjustment pass if `ADJUST_EVERY` iterations have been recorded
    /// since the last attempt and at least `MIN_METRICS_FOR_ADJUST` metrics
    /// exist. This is the gated entry point the doubling loop calls after
    /// every iteration; `adjust` itself runs unconditionally.
    pub fn maybe_adjust(&mut self) {
        if self.iterations_since_adjust < ADJUST_EVERY
            || self.metrics.len() < MIN_METRICS_FOR_ADJUST
        {
            return;
        }
        self.iterations_since_adjust = 0;
        self.adjust();
    }

    /// Adjust thresholds based on collected metrics.
    ///
    /// Partitions metrics into "used the optimisation" and "did not",
    /// compares their average time-per-bit, and lowers or raises the
    /// threshold once the resulting ratio clears a hysteresis margin around
    /// its target, clamping the result between a floor and a ceiling.
    pub fn adjust(&mut self) {
        if self.metrics.is_empty() {
            return;
        }

        let stats = self.compute_stats();
        self.adjust_fft(&stats.fft);
        self.adjust_parallel(&stats.parallel);
    }

    fn adjust_fft(&mut self, stats: &PartitionStats) {
        let Some(ratio) = stats.speedup_ratio else {
            return;
        };

        let old = self.current_fft;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let new = if ratio > FFT_ENABLE_TARGET * (1.0 + HYSTERESIS_MARGIN) {
            (old as f64 * FFT_LOWER_FACTOR) as usize
        } else if ratio < (1.0 / FFT_ENABLE_TARGET) * (1.0 - HYSTERESIS_MARGIN) {
            (old as f64 * FFT_RAISE_FACTOR) as usize
        } else {
            return;
        };

        self.current_fft = new.clamp(self.fft_floor, self.fft_ceiling);
        if self.current_fft != old {
            self.record_adjustment("fft", old, self.current_fft, ratio);
        }
    }

    fn adjust_parallel(&mut self, stats: &PartitionStats) {
        let Some(ratio) = stats.speedup_ratio else {
            return;
        };

        let old = self.current_parallel;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let new = if ratio > PARALLEL_ENABLE_TARGET * (1.0 + HYSTERESIS_MARGIN) {
            (old as f64 * PARALLEL_LOWER_FACTOR) as usize
        } else if ratio < (1.0 / PARALLEL_ENABLE_TARGET) * (1.0 - HYSTERESIS_MARGIN) {
            (old as f64 * PARALLEL_RAISE_FACTOR) as usize
        } else {
            return;
        };

        self.current_parallel = new.clamp(self.parallel_floor, self.parallel_ceiling);
        if self.current_parallel != old {
            self.record_adjustment("parallel", old, self.current_parallel, ratio);
        }
    }

    fn record_adjustment(&mut self, name: &str, old: usize, new: usize, ratio: f64) {
        self.adjustment_count += 1;
        self.adjustment_history.push(ThresholdAdjustment {
            threshold_name: name.to_string(),
            old_value: old,
            new_value: new,
            trigger_benefit: ratio,
        });
        // Keep only the last 64 adjustments
        if self.adjustment_history.len() > 64 {
            self.adjustment_history.remove(0);
        }
    }

    /// Partition metrics by whether they used a given optimisation and
    /// compute the non-optimised/optimised average time-per-bit ratio.
    fn partition(
        metrics: &[IterationMetric],
        used: impl Fn(&IterationMetric) -> bool,
    ) -> PartitionStats {
        let (optimised, unoptimised): (Vec<IterationMetric>, Vec<IterationMetric>) =
            metrics.iter().copied().partition(|m| used(m));

        let avg_time_per_bit = |group: &[IterationMetric]| -> Option<f64> {
            if group.is_empty() {
                None
            } else {
                Some(group.iter().map(|m| m.time_per_bit()).sum::<f64>() / group.len() as f64)
            }
        };

        let optimised_time_per_bit = avg_time_per_bit(&optimised);
        let unoptimised_time_per_bit = avg_time_per_bit(&unoptimised);

        let speedup_ratio = match (unoptimised_time_per_bit, optimised_time_per_bit) {
            (Some(unopt), Some(opt)) if opt > 0.0 => Some(unopt / opt),
            _ => None,
        };

        PartitionStats {
            optimised_time_per_bit,
            unoptimised_time_per_bit,
            speedup_ratio,
        }
    }

    fn compute_stats(&self) -> ThresholdStats {
        let fft = Self::partition(&self.metrics, |m| m.used_fft);
        let parallel = Self::partition(&self.metrics, |m| m.used_parallel);

        ThresholdStats {
            fft,
            parallel,
            sample_count: self.metrics.len(),
        }
    }

    /// Get current parallel threshold.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.current_parallel
    }

    /// Get current FFT threshold.
    #[must_use]
    pub fn fft_threshold(&self) -> usize {
        self.current_fft
    }

    /// Get current Strassen threshold.
    #[must_use]
    pub fn strassen_threshold(&self) -> usize {
        self.current_strassen
    }

    /// Get a serializable snapshot of current thresholds and history.
    #[must_use]
    pub fn snapshot(&self) -> ThresholdSnapshot {
        ThresholdSnapshot {
            parallel_threshold: self.current_parallel,
            fft_threshold: self.current_fft,
            strassen_threshold: self.current_strassen,
            adjustment_count: self.adjustment_count,
            adjustment_history: self.adjustment_history.clone(),
        }
    }

    /// Get computed statistics from the current metrics buffer.
    #[must_use]
    pub fn stats(&self) -> Option<ThresholdStats> {
        if self.metrics.is_empty() {
            return None;
        }
        Some(self.compute_stats())
    }

    /// Reset the manager to default thresholds and clear all metrics.
    pub fn reset(&mut self) {
        self.metrics.clear();
        self.ring_pos = 0;
        self.ring_full = false;
        self.iterations_since_adjust = 0;
        self.current_parallel = DEFAULT_PARALLEL_THRESHOLD;
        self.current_fft = DEFAULT_FFT_THRESHOLD;
        self.current_strassen = DEFAULT_STRASSEN_THRESHOLD;
        self.fft_floor = FFT_THRESHOLD_FLOOR;
        self.fft_ceiling = DEFAULT_FFT_THRESHOLD.saturating_mul(FFT_CEILING_MULTIPLIER);
        self.parallel_floor = PARALLEL_THRESHOLD_FLOOR;
        self.parallel_ceiling =
            DEFAULT_PARALLEL_THRESHOLD.saturating_mul(PARALLEL_CEILING_MULTIPLIER);
        self.adjustment_count = 0;
        self.adjustment_history.clear();
    }

    /// Whether the ring buffer is full (has wrapped around at least once).
    #[must_use]
    pub fn is_ring_full(&self) -> bool {
        self.ring_full
    }

    /// Number of threshold adjustments made so far.
    #[must_use]
    pub fn adjustment_count(&self) -> usize {
        self.adjustment_count
    }

    /// Set thresholds directly (e.g., from a loaded calibration profile),
    /// re-deriving the floor/ceiling bounds from the new starting values.
    pub fn set_thresholds(&mut self, parallel: usize, fft: usize, strassen: usize) {
        self.current_parallel = parallel;
        self.current_fft = fft;
        self.current_strassen = strassen;
        self.fft_ceiling = fft.saturating_mul(FFT_CEILING_MULTIPLIER);
        self.parallel_ceiling = parallel.saturating_mul(PARALLEL_CEILING_MULTIPLIER);
    }
}

impl Default for DynamicThresholdManager {
    fn default() -> Self {
        Self::new(DynamicThresholdConfig::default())
    }
}
