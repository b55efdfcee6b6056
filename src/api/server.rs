//! # HTTP Server
//!
//! Binds the catalog router to the configured address.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::routes::{router, AppState};
use super::service::CatalogService;
use crate::lifecycle::CatalogConfig;

/// HTTP server for the product catalog
pub struct HttpServer {
    config: CatalogConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: CatalogConfig, service: CatalogService) -> Self {
        let router = router(Arc::new(AppState::new(service)));
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves requests until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        info!(addr = %listener.local_addr()?, "Product catalog listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
