//! OPEX test harness: in-memory store and fixtures for the
//! golden/invariant tests under `tests/`.

pub mod fixtures;
pub mod memstore;

pub use memstore::MemoryStore;

/// Initialise test logging once; honours `RUST_LOG`, defaults to quiet.
/// Safe to call from every test; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
