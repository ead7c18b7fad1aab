//! Iterative Fibonacci sequence generator.

use num_bigint::BigUint;

use crate::calculator::FibError;
use crate::generator::SequenceGenerator;
use crate::progress::CancellationToken;

/// Iterative generator that computes sequential Fibonacci numbers.
#[allow(dead_code)] // TODO: Phase 3 — PRD §2.15.1 IterativeGenerator
pub struct IterativeGenerator;

#[allow(dead_code)] // TODO: Phase 3 — PRD §2.15.1 IterativeGenerator
impl IterativeGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for IterativeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceGenerator for IterativeGenerator {
    #[allow(clippy::cast_possible_truncation)]
    fn generate(
        &self,
        start: u64,
        end: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<(u64, BigUint)>, FibError> {
        if start > end {
            return Err(FibError::Config("start must be <= end".into()));
        }

        let mut results = Vec::with_capacity((end - start + 1) as usize);
        let mut a = BigUint::from(0u32);
        let mut b = BigUint::from(1u32);

        for i in 0..=end {
            if cancel.is_cancelled() {
                return Err(FibError::Cancelled);
            }

            if i >= start {
                results.push((i, a.clone()));
            }

            let next = &a + &b;
            a = std::mem::replace(&mut b, next);
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "IterativeGenerator"
    }
}
