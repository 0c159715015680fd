//! Tracing subscriber setup.
//!
//! Proxies log every step application at TRACE under the `connmock` target,
//! supplier changes at DEBUG and version loading at INFO. Filtering follows
//! `CONNMOCK_LOG`, then `RUST_LOG`, then the given default.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted first for the log filter.
pub const LOG_ENV: &str = "CONNMOCK_LOG";

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs a global subscriber writing compact lines to stderr.
/// Returns false when a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter(default_directive))
        .with(fmt::layer().with_target(true).compact())
        .try_init()
        .is_ok()
}

/// Like [`init`], but writes through the test harness so output is captured
/// per test.
pub fn init_for_tests() -> bool {
    tracing_subscriber::registry()
        .with(filter("connmock=trace"))
        .with(fmt::layer().with_test_writer().compact())
        .try_init()
        .is_ok()
}
