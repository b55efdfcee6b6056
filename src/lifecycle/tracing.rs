//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for the application.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`:
/// - `RUST_LOG=info` - requests, store mutations, startup and shutdown
/// - `RUST_LOG=debug` - adds every store message with its payload
/// - `RUST_LOG=product_catalog=debug,tower_http=debug` - per-crate control
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type and span names identify the source
        .compact()
        .init();
}
