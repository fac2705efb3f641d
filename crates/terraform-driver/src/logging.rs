//! Log output setup

use tracing::Level;

/// Setting this variable (to anything) turns on debug logging
pub const DEBUG_ENV_VAR: &str = "MACHINE_DEBUG";

/// The log level for this run
pub fn level(verbose: bool) -> Level {
    if verbose || std::env::var_os(DEBUG_ENV_VAR).is_some_and(|v| !v.is_empty()) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Initialize tracing. Logs go to stderr so stdout stays clean for command output.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_max_level(level(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
