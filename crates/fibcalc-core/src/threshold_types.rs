//! Types for dynamic threshold management.

use serde::{Deserialize, Serialize};

/// Metric collected for each doubling-loop iteration.
///
/// Records whether the iteration exceeded the FFT/parallel thresholds in
/// effect at the time, so later analysis can partition iterations by
/// "used the optimisation" vs. "did not" and compare their time-per-bit.
#[derive(Debug, Clone, Copy)]
pub struct IterationMetric {
    /// Bit length of operands in this iteration.
    pub bit_length: usize,
    /// Duration of the iteration in nanoseconds.
    pub duration_ns: u64,
    /// Whether FFT-based multiplication was used for this iteration.
    pub used_fft: bool,
    /// Whether parallel execution was used for this iteration.
    pub used_parallel: bool,
}

impl IterationMetric {
    /// Create a new iteration metric.
    #[must_use]
    pub fn new(bit_length: usize, duration_ns: u64, used_fft: bool, used_parallel: bool) -> Self {
        Self {
            bit_length,
            duration_ns,
            used_fft,
            used_parallel,
        }
    }

    /// Time per bit of operand width, in nanoseconds.
    #[must_use]
    pub fn time_per_bit(&self) -> f64 {
        self.duration_ns as f64 / self.bit_length.max(1) as f64
    }
}

/// Aggregated statistics for one threshold's partitioned metrics.
#[derive(Debug, Clone, Copy)]
pub struct PartitionStats {
    /// Average nanoseconds-per-bit among iterations that used the optimisation.
    pub optimised_time_per_bit: Option<f64>,
    /// Average nanoseconds-per-bit among iterations that did not.
    pub unoptimised_time_per_bit: Option<f64>,
    /// `unoptimised / optimised` time-per-bit ratio; `None` if either side is empty.
    pub speedup_ratio: Option<f64>,
}

/// Aggregated statistics for threshold adjustment.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdStats {
    /// Partitioned stats for the FFT threshold.
    pub fft: PartitionStats,
    /// Partitioned stats for the parallel threshold.
    pub parallel: PartitionStats,
    /// Number of samples the stats were computed from.
    pub sample_count: usize,
}

/// Serializable snapshot of the current threshold state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    /// Current parallel threshold.
    pub parallel_threshold: usize,
    /// Current FFT threshold.
    pub fft_threshold: usize,
    /// Current Strassen threshold.
    pub strassen_threshold: usize,
    /// Number of adjustments made.
    pub adjustment_count: usize,
    /// History of recent adjustments (threshold name, old value, new value).
    pub adjustment_history: Vec<ThresholdAdjustment>,
}

/// Record of a single threshold adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdAdjustment {
    /// Which threshold was adjusted.
    pub threshold_name: String,
    /// Old value.
    pub old_value: usize,
    /// New value.
    pub new_value: usize,
    /// The non-optimised/optimised speedup ratio that triggered the change.
    pub trigger_benefit: f64,
}

/// Configuration for the `DynamicThresholdManager`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DynamicThresholdConfig {
    /// Size of the ring buffer for metrics.
    pub ring_buffer_size: usize,
}

impl Default for DynamicThresholdConfig {
    fn default() -> Self {
        Self {
            ring_buffer_size: 20,
        }
    }
}
