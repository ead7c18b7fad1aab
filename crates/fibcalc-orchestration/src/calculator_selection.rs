//! Calculator selection logic.

use std::sync::Arc;

use fibcalc_core::calculator::{Calculator, FibError};
use fibcalc_core::registry::CalculatorFactory;

/// Get calculators to run based on algorithm selection.
///
/// # Errors
///
/// Returns `FibError` if the requested algorithm name is unknown.
pub fn get_calculators_to_run(
    algo: &str,
    factory: &dyn CalculatorFactory,
) -> Result<Vec<Arc<dyn Calculator>>, FibError> {
    match algo {
        "all" => {
            let names = factory.available();
            let mut calcs = Vec::new();
            for name in names {
                calcs.push(factory.get(name)?);
            }
            Ok(calcs)
        }
        name => {
            let calc = factory.get(name)?;
            Ok(vec![calc])
        }
    }
}
