//! # Product Client
//!
//! Provides a high-level API for the product store actor.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Store a new product; the store assigns its id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: NewProduct) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Apply a validated patch to an existing product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Current number of stored products.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<usize, ProductError> {
        debug!("Sending request");
        self.inner.count().await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_update, MockClient};

    fn sample(id: u64) -> Product {
        Product {
            id: ProductId(id),
            name: "Desk".to_string(),
            price: 120.0,
            category: "Office".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_update_forwards_patch() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let update_task = tokio::spawn(async move {
            let patch = ProductPatch {
                in_stock: Some(false),
                ..Default::default()
            };
            product_client.update_product(ProductId(4), patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(4));
        assert_eq!(patch.in_stock, Some(false));
        assert!(patch.name.is_none());

        let mut updated = sample(4);
        updated.in_stock = false;
        responder.send(Ok(updated)).unwrap();

        let result = update_task.await.unwrap().unwrap();
        assert!(!result.in_stock);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_product_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_delete(ProductId(99))
            .return_err(FrameworkError::NotFound(ProductId(99).to_string()));

        let client = ProductClient::new(mock.client());
        let result = client.delete(ProductId(99)).await;

        assert_eq!(result, Err(ProductError::NotFound("product_99".to_string())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_count().return_err(FrameworkError::ActorClosed);

        let client = ProductClient::new(mock.client());
        match client.count().await {
            Err(ProductError::ActorCommunicationError(msg)) => assert!(msg.contains("closed")),
            other => panic!("Expected ActorCommunicationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_count_asks_the_store_for_its_size() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_count().return_ok(3);

        let client = ProductClient::new(mock.client());
        assert_eq!(client.count().await.unwrap(), 3);
        mock.verify();
    }
}
