//! FibCalc-rs — High-performance Fibonacci calculator.

mod app;
mod config;
mod errors;
mod version;

use fibcalc_core::calculator::FibError;
use fibcalc_core::constants::exit_codes;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Parse CLI args and run
    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        let code = err
            .downcast_ref::<FibError>()
            .map_or(exit_codes::ERROR_GENERIC, errors::handle_error);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
