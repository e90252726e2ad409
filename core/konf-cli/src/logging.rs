//! Log setup for konf-go.
//!
//! Everything goes to stderr: stdout is reserved for the shell wrapper.

use std::env;

use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "KONF_DEBUG_LOG";

pub fn init(silent: bool) {
    let filter = if silent {
        EnvFilter::new("off")
    } else if debug_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn debug_enabled() -> bool {
    env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}
