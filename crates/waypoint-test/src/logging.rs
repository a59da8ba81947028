//! Test logging.
//!
//! [`init_test_logging`] routes `tracing` output through the test harness's
//! captured writer, so it only shows for failing tests. The filter comes from
//! `RUST_LOG` and defaults to debug output for the routing and navigation
//! crates.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "waypoint_routing=debug,waypoint_navigation=debug";

static TEST_LOGGING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();
});

/// Installs the test subscriber once per process. Safe to call from every test.
pub fn init_test_logging() {
    Lazy::force(&TEST_LOGGING);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!(target: "waypoint_navigation", "logging from a test");
    }
}
