//! Multiplication strategy traits and implementations.
//!
//! `Multiplier` is the narrow interface for multiply/square operations.
//! `DoublingStepExecutor` extends it for optimized Fast Doubling steps.
//! Strategies include Karatsuba, FFT, and adaptive selection.

use num_bigint::BigUint;
use rayon;

/// Narrow interface for multiplication operations (ISP).
pub trait Multiplier: Send + Sync {
    /// Multiply two big unsigned integers.
    fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint;

    /// Square a big unsigned integer (may be optimized over multiply).
    fn square(&self, a: &BigUint) -> BigUint {
        self.multiply(a, a)
    }

    /// Get the name of this multiplication strategy.
    fn name(&self) -> &str;
}

/// Extended interface for optimized Fast Doubling steps.
pub trait DoublingStepExecutor: Multiplier {
    /// Execute a complete doubling step: given F(k) and F(k+1),
    /// compute F(2k) and F(2k+1).
    ///
    /// Returns (F(2k), F(2k+1)).
    fn execute_doubling_step(&self, fk: &BigUint, fk1: &BigUint) -> (BigUint, BigUint);
}

/// Karatsuba multiplication strategy (default for small numbers).
pub struct KaratsubaStrategy;

impl KaratsubaStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for KaratsubaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier for KaratsubaStrategy {
    fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b
    }

    fn square(&self, a: &BigUint) -> BigUint {
        a * a
    }

    fn name(&self) -> &'static str {
        "Karatsuba"
    }
}

impl DoublingStepExecutor for KaratsubaStrategy {
    fn execute_doubling_step(&self, fk: &BigUint, fk1: &BigUint) -> (BigUint, BigUint) {
        // F(2k) = F(k) * (2*F(k+1) - F(k))  — 1 multiply
        let t = (fk1 << 1u32) - fk;
        let f2k = self.multiply(fk, &t);
        // F(2k+1) = F(k)^2 + F(k+1)^2       — 2 squarings
        let f2k1 = self.square(fk) + self.square(fk1);

        (f2k, f2k1)
    }
}

/// Parallel Karatsuba strategy that uses `rayon::join` to parallelize
/// the three independent multiplications in the doubling step when
/// operand bits exceed the parallel threshold.
pub struct ParallelKaratsubaStrategy {
    parallel_threshold: usize,
}

impl ParallelKaratsubaStrategy {
    #[must_use]
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }
}

impl Multiplier for ParallelKaratsubaStrategy {
    fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b
    }

    fn square(&self, a: &BigUint) -> BigUint {
        a * a
    }

    fn name(&self) -> &'static str {
        "ParallelKaratsuba"
    }
}

impl DoublingStepExecutor for ParallelKaratsubaStrategy {
    fn execute_doubling_step(&self, fk: &BigUint, fk1: &BigUint) -> (BigUint, BigUint) {
        // F(2k) = F(k) * (2*F(k+1) - F(k))  — 1 multiply
        // F(2k+1) = F(k)^2 + F(k+1)^2       — 2 squarings
        let t = (fk1 << 1u32) - fk;
        let max_bits = fk.bits().max(fk1.bits()) as usize;

        if max_bits >= self.parallel_threshold {
            // Parallel: multiply and 2 squarings concurrently
            let ((fk_sq, fk1_sq), f2k) = rayon::join(
                || rayon::join(|| fk * fk, || fk1 * fk1),
                || fk * &t,
            );
            let f2k1 = fk_sq + fk1_sq;
            (f2k, f2k1)
        } else {
            // Sequential for small operands
            let f2k = self.multiply(fk, &t);
            let f2k1 = self.square(fk) + self.square(fk1);
            (f2k, f2k1)
        }
    }
}

/// FFT-only multiplication strategy (for very large numbers).
pub struct FFTOnlyStrategy;

impl FFTOnlyStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FFTOnlyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier for FFTOnlyStrategy {
    fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        fibcalc_bigfft::mul(a, b)
    }

    fn square(&self, a: &BigUint) -> BigUint {
        fibcalc_bigfft::sqr(a)
    }

    fn name(&self) -> &'static str {
        "FFT"
    }
}

impl DoublingStepExecutor for FFTOnlyStrategy {
    fn execute_doubling_step(&self, fk: &BigUint, fk1: &BigUint) -> (BigUint, BigUint) {
        // F(2k) = F(k) * (2*F(k+1) - F(k))  — 1 multiply
        let t = (fk1 << 1u32) - fk;
        let f2k = self.multiply(fk, &t);
        // F(2k+1) = F(k)^2 + F(k+1)^2       — 2 squarings
        let f2k1 = self.square(fk) + self.square(fk1);

        (f2k, f2k1)
    }
}

/// Adaptive strategy that selects multiplication method based on operand size.
pub struct AdaptiveStrategy {
    fft_threshold: usize,
    _strassen_threshold: usize,
}

impl AdaptiveStrategy {
    #[must_use]
    pub fn new(fft_threshold: usize, strassen_threshold: usize) -> Self {
        Self {
            fft_threshold,
            _strassen_threshold: strassen_threshold,
        }
    }

    /// Get the bit length of a `BigUint`.
    fn bit_len(n: &BigUint) -> usize {
        n.bits() as usize
    }
}

impl Multiplier for AdaptiveStrategy {
    fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let max_bits = Self::bit_len(a).max(Self::bit_len(b));
        if max_bits >= self.fft_threshold {
            fibcalc_bigfft::mul(a, b)
        } else {
            a * b
        }
    }

    fn square(&self, a: &BigUint) -> BigUint {
        let bits = Self::bit_len(a);
        if bits >= self.fft_threshold {
            fibcalc_bigfft::sqr(a)
        } else {
            a * a
        }
    }

    fn name(&self) -> &'static str {
        "Adaptive"
    }
}

impl DoublingStepExecutor for AdaptiveStrategy {
    fn execute_doubling_step(&self, fk: &BigUint, fk1: &BigUint) -> (BigUint, BigUint) {
        // F(2k) = F(k) * (2*F(k+1) - F(k))  — 1 multiply
        let t = (fk1 << 1u32) - fk;
        let f2k = self.multiply(fk, &t);
        // F(2k+1) = F(k)^2 + F(k+1)^2       — 2 squarings
        let f2k1 = self.square(fk) + self.square(fk1);

        (f2k, f2k1)
    }
}
