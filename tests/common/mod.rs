//! Integration test common infrastructure.
//!
//! Provides a tracing hook and fresh-world constructors shared by the
//! integration test binaries.

use chatd_core::{Chat, CoreConfig};

/// Install a tracing subscriber once so test runs honor `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A facade over fresh registries with the default configuration.
#[allow(dead_code)]
pub fn fresh_chat() -> Chat {
    init_tracing();
    Chat::from_config(&CoreConfig::default())
}
