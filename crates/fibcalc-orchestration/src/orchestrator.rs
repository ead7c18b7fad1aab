//! Core orchestration: parallel execution and result analysis.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fibcalc_core::calculator::{Calculator, FibError};
use fibcalc_core::observer::ProgressObserver;
use fibcalc_core::observers::NoOpObserver;
use fibcalc_core::options::Options;
use fibcalc_core::progress::CancellationToken;

use crate::interfaces::CalculationResult;

/// Execute calculations with all given calculators.
pub fn execute_calculations(
    calculators: &[Arc<dyn Calculator>],
    n: u64,
    opts: &Options,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
) -> Vec<CalculationResult> {
    execute_calculations_with_observer(calculators, n, opts, cancel, timeout, &NoOpObserver::new())
}

/// Execute calculations with all given calculators and a progress observer.
pub fn execute_calculations_with_observer(
    calculators: &[Arc<dyn Calculator>],
    n: u64,
    opts: &Options,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    observer: &dyn ProgressObserver,
) -> Vec<CalculationResult> {
    let start_time = Instant::now();

    if calculators.len() == 1 {
        // Single calculator: run directly
        let calc = &calculators[0];
        let start = Instant::now();
        let outcome = calc.calculate(cancel, observer, 0, n, opts);
        let duration = start.elapsed();

        return vec![CalculationResult {
            algorithm: calc.name().to_string(),
            outcome,
            duration,
        }];
    }

    // Multiple calculators: run in parallel using rayon
    use rayon::iter::{IntoParallelIterator, ParallelIterator};

    let results: Vec<CalculationResult> = calculators
        .iter()
        .enumerate()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(i, calc)| {
            let start = Instant::now();

            // Check timeout
            if let Some(timeout) = timeout {
                if start_time.elapsed() > timeout {
                    return CalculationResult {
                        algorithm: calc.name().to_string(),
                        outcome: Err(FibError::Timeout(format!("{timeout:?}"))),
                        duration: start.elapsed(),
                    };
                }
            }

            let outcome = calc.calculate(cancel, observer, i, n, opts);
            let duration = start.elapsed();

            CalculationResult {
                algorithm: calc.name().to_string(),
                outcome,
                duration,
            }
        })
        .collect();

    results
}

/// Analyze comparison results for mismatches.
///
/// Successful results are ordered by ascending duration before comparison,
/// so the fastest algorithm is always used as the reference value.
pub fn analyze_comparison_results(results: &[CalculationResult]) -> Result<(), FibError> {
    let mut valid_results: Vec<&CalculationResult> =
        results.iter().filter(|r| r.outcome.is_ok()).collect();

    if valid_results.is_empty() {
        return Err(FibError::Calculation("no valid results".into()));
    }

    valid_results.sort_by_key(|r| r.duration);

    let reference = valid_results[0]
        .outcome
        .as_ref()
        .expect("filtered to Ok above");
    for result in &valid_results[1..] {
        let value = result.outcome.as_ref().expect("filtered to Ok above");
        if value != reference {
            return Err(FibError::Mismatch);
        }
    }

    Ok(())
}
