//! # Request Façade
//!
//! Maps external requests onto the validator, the query engine and the store, and maps
//! the outcome back to a status code and JSON payload.
//!
//! - [`service`] - transport-independent façade ([`CatalogService`])
//! - [`routes`] - axum router and handlers
//! - [`server`] - binds the router to a socket
//! - [`error`] - [`ApiError`] and its HTTP mapping

pub mod error;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod stats;

pub use error::{ApiError, ApiResult};
pub use response::*;
pub use routes::{router, AppState};
pub use server::HttpServer;
pub use service::CatalogService;
pub use stats::RequestStats;
