use clap::Parser;
use product_catalog::api::{CatalogService, HttpServer};
use product_catalog::lifecycle::{setup_tracing, CatalogConfig, CatalogSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = CatalogConfig::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(?config, "Starting product catalog");

    let system = CatalogSystem::new(&config).map_err(|e| e.to_string())?;
    let service = CatalogService::new(system.product_client.clone());
    let server = HttpServer::new(config, service);

    server
        .start(shutdown_signal())
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Product catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
