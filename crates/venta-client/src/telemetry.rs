//! Logging setup for binaries embedding the client.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,venta=debug,reqwest=warn";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns false if a global subscriber was already installed (tests, or a
/// host application with its own logging); that is not an error.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
