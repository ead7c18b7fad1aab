//! Error handling and exit codes.

use fibcalc_core::calculator::FibError;
use fibcalc_core::constants::exit_codes;

/// Handle a calculation error and return the appropriate exit code.
pub fn handle_error(err: &FibError) -> i32 {
    match err {
        FibError::Calculation(_) | FibError::Overflow(_, _) | FibError::InvalidInput(_) => {
            exit_codes::ERROR_GENERIC
        }
        FibError::Config(_) => exit_codes::ERROR_CONFIG,
        FibError::Cancelled => exit_codes::ERROR_CANCELED,
        FibError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        FibError::Mismatch => exit_codes::ERROR_MISMATCH,
    }
}
