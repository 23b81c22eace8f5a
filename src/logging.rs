//! Tracing subscriber setup for the abbrevcheck binary
//!
//! The library itself only emits events; only the binary installs a
//! subscriber. `RUST_LOG` takes precedence over the provided default level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Create a base env filter honoring RUST_LOG with a fallback level
pub fn create_base_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the tracing subscriber for CLI use.
///
/// Logs go to stderr so stdout stays clean for report output (text
/// summaries and `--format json` both print to stdout).
pub fn init_logging(default_level: Option<&str>) {
    let default = default_level.unwrap_or("info");
    let env_filter = create_base_env_filter(default);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
