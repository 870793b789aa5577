//! Shared setup for the integration suites.

/// Initialize test logging once per test binary.
///
/// Controlled through `RUST_LOG`; quiet by default. Safe to call from every
/// test, later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
