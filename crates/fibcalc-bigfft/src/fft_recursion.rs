//! Recursive FFT implementation with parallelism.

use crate::fermat::FermatNum;

/// Recursive FFT with threshold-based parallelism.
pub fn fft_recursive(data: &mut [FermatNum], shift: usize, parallel_threshold: usize) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    if n <= parallel_threshold {
        // Sequential base case
        fft_sequential(data, shift);
    } else {
        // Parallel recursive case
        // Split into even and odd elements
        // TODO: Implement parallel FFT recursion using rayon
        fft_sequential(data, shift);
    }
}

/// Sequential FFT (base case for recursion).
fn fft_sequential(data: &mut [FermatNum], shift: usize) {
    use crate::fft_core::fft_forward;
    fft_forward(data, shift);
}
