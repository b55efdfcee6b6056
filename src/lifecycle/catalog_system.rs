use crate::clients::ProductClient;
use crate::lifecycle::CatalogConfig;
use crate::product_actor::{self, ProductError};
use tracing::{error, info};

/// Runtime orchestrator for the product store.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: starting the seeded store actor and stopping it
/// - **Handing out clients**: every request path talks to the store through a clone of
///   [`CatalogSystem::product_client`]
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(&CatalogConfig::default())?;
/// let service = CatalogService::new(system.product_client.clone());
/// // ... serve requests ...
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for interacting with the product store actor
    pub product_client: ProductClient,

    /// Task handle for the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    /// Seeds the product store and spawns its actor. Must be called inside a Tokio runtime.
    pub fn new(config: &CatalogConfig) -> Result<Self, ProductError> {
        let (product_actor, product_client) = product_actor::new(config.buffer_size)?;

        // Product store has no dependencies (Context = ())
        let handle = tokio::spawn(product_actor.run(()));

        Ok(Self {
            product_client,
            handle,
        })
    }

    /// Gracefully shuts down the store.
    ///
    /// Drops this system's client and waits for the actor task. The actor only exits
    /// once every clone of the client is gone, so callers must drop theirs first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
