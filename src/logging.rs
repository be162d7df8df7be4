//! Logging initialisation on top of `tracing-subscriber`

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global subscriber
///
/// Reads the filter from `RUST_LOG` (for example
/// `RUST_LOG=material_flow_core=debug`), defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Initialise a debug-level subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs it.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
