//! Process-wide tracing/logging setup.

/// Initialize tracing for the process.
///
/// Safe to call multiple times; subsequent calls are no-ops, so library
/// tests can call it freely.
pub fn init() {
    tracing::install();
}

pub mod tracing;
