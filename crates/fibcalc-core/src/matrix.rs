//! Matrix Exponentiation algorithm for Fibonacci computation.
//!
//! Computes F(n) via Q^n where Q = [[1,1],[1,0]].
//! Uses binary exponentiation (square-and-multiply).
//! Includes thread-local pooling of `MatrixState` objects.

use std::cell::RefCell;

use num_bigint::BigUint;
use parking_lot::Mutex;

use crate::calculator::{CoreCalculator, FibError};
use crate::matrix_ops::{matrix_multiply_strassen, matrix_square};
use crate::matrix_types::MatrixState;
use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::progress::{CancellationToken, ProgressUpdate};

/// Thread-safe pool of `MatrixState` objects.
pub struct MatrixStatePool {
    pool: Mutex<Vec<MatrixState>>,
    max_size: usize,
}

impl MatrixStatePool {
    /// Create a new pool with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            pool: Mutex::new(Vec::with_capacity(max_size)),
            max_size,
        }
    }

    /// Acquire a `MatrixState` from the pool, or create a new one.
    /// The returned state is always reset and ready for use.
    pub fn acquire(&self) -> MatrixState {
        let mut pool = self.pool.lock();
        match pool.pop() {
            Some(mut state) => {
                state.reset();
                state
            }
            None => MatrixState::new(),
        }
    }

    /// Return a `MatrixState` to the pool for reuse.
    pub fn release(&self, state: MatrixState) {
        let mut pool = self.pool.lock();
        if pool.len() < self.max_size {
            pool.push(state);
        }
    }

    /// Get the number of states currently in the pool.
    #[must_use]
    pub fn available(&self) -> usize {
        self.pool.lock().len()
    }
}

impl Default for MatrixStatePool {
    fn default() -> Self {
        Self::new(4)
    }
}

thread_local! {
    static MATRIX_STATE_POOL: RefCell<Vec<MatrixState>> = const { RefCell::new(Vec::new()) };
}

const THREAD_LOCAL_POOL_MAX: usize = 4;

/// Acquire a `MatrixState` from the thread-local pool.
fn tl_acquire_state() -> MatrixState {
    MATRIX_STATE_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        match pool.pop() {
            Some(mut state) => {
                state.reset();
                state
            }
            None => MatrixState::new(),
        }
    })
}

/// Return a `MatrixState` to the thread-local pool.
fn tl_release_state(state: MatrixState) {
    MATRIX_STATE_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.len() < THREAD_LOCAL_POOL_MAX {
            pool.push(state);
        }
    });
}

/// Matrix Exponentiation calculator.
pub struct MatrixExponentiation;

impl MatrixExponentiation {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Execute the matrix exponentiation loop.
    fn execute_matrix_loop(
        &self,
        n: u64,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        strassen_threshold: usize,
    ) -> Result<BigUint, FibError> {
        let num_bits = 64 - n.leading_zeros();
        let mut state = tl_acquire_state();

        let frozen = observer.freeze();

        let result = (|| {
            // Binary exponentiation: square-and-multiply
            for i in (0..num_bits).rev() {
                if cancel.is_cancelled() {
                    return Err(FibError::Cancelled);
                }

                // Square the result
                state.result = matrix_square(&state.result);

                // Multiply by base if bit is set
                if (n >> i) & 1 == 1 {
                    state.result =
                        matrix_multiply_strassen(&state.result, &state.base, strassen_threshold);
                }

                // Progress reporting
                let progress = 1.0 - (f64::from(i) / f64::from(num_bits));
                if frozen.should_report(progress) {
                    frozen.update(progress);
                    observer.on_progress(&ProgressUpdate::new(
                        calc_index,
                        "MatrixExponentiation",
                        progress,
                        u64::from(num_bits - i),
                        u64::from(num_bits),
                    ));
                }
            }

            // Extract F(n) = Q^n[0][1] (or [1][0])
            Ok(std::mem::take(&mut state.result.b))
        })();

        // Return state to pool regardless of success/failure
        tl_release_state(state);

        result
    }
}

impl Default for MatrixExponentiation {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreCalculator for MatrixExponentiation {
    fn calculate_core(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        n: u64,
        opts: &Options,
    ) -> Result<BigUint, FibError> {
        let result =
            self.execute_matrix_loop(n, cancel, observer, calc_index, opts.strassen_threshold)?;
        observer.on_progress(&ProgressUpdate::done(calc_index, "MatrixExponentiation"));
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "MatrixExponentiation"
    }
}
