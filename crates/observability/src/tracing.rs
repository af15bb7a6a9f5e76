//! Subscriber installation.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: compact plain-text output with timestamps,
/// level filtering via `RUST_LOG` (default `info`).
pub fn install() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
