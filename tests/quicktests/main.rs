//! Property tests against the public API.

mod balanced;

/// Routes `tracing` output from the tree into the test harness. Set `RUST_LOG=avl=trace` to see
/// every rotation.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
