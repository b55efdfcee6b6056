//! # System Lifecycle
//!
//! Starting, configuring and stopping the service.
//!
//! - [`CatalogSystem`] - spawns the seeded product store actor and shuts it down
//! - [`CatalogConfig`] - command-line / environment configuration
//! - [`setup_tracing`] - logging initialization
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop serving** - the HTTP server drains and drops its router, and with it the
//!    service's client clone
//! 2. **Drop the last client** - [`CatalogSystem::shutdown`] drops its own clone,
//!    closing the channel
//! 3. **Actor exits** - `receiver.recv()` returns `None`, the actor logs its final size
//! 4. **Await completion** - the actor task is joined

pub mod catalog_system;
pub mod config;
pub mod tracing;

pub use catalog_system::*;
pub use config::*;
pub use self::tracing::*;
