//! FFT multiplication wrappers.
//!
//! Provides `mul_fft`, `sqr_fft`, `smart_multiply`, and `smart_square`
//! that route to FFT or Karatsuba based on operand size.

use num_bigint::BigUint;

#[cfg(test)]
use crate::constants::DEFAULT_FFT_THRESHOLD;

/// Multiply using FFT if operands are large enough, otherwise use default.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn smart_multiply(a: &BigUint, b: &BigUint, fft_threshold: usize) -> BigUint {
    let max_bits = a.bits().max(b.bits()) as usize;
    if max_bits >= fft_threshold {
        mul_fft(a, b)
    } else {
        a * b
    }
}

/// Square using FFT if operand is large enough.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn smart_square(a: &BigUint, fft_threshold: usize) -> BigUint {
    let bits = a.bits() as usize;
    if bits >= fft_threshold {
        sqr_fft(a)
    } else {
        a * a
    }
}

/// FFT multiplication via fibcalc-bigfft.
#[must_use]
pub fn mul_fft(a: &BigUint, b: &BigUint) -> BigUint {
    fibcalc_bigfft::mul(a, b)
}

/// FFT squaring via fibcalc-bigfft.
#[must_use]
pub fn sqr_fft(a: &BigUint) -> BigUint {
    fibcalc_bigfft::sqr(a)
}
