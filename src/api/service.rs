//! # Catalog Service
//!
//! The request façade. Each method takes the raw pieces of a request (path segment,
//! query map, body bytes), runs them through [`crate::validation`] and
//! [`crate::query`], talks to the store through [`ProductClient`], and returns either
//! a response payload or an [`ApiError`]. HTTP routing lives in [`super::routes`];
//! nothing here depends on axum.
//!
//! Check order for operations on a single product:
//! 1. body syntax (400 `Invalid JSON`)
//! 2. id format (400)
//! 3. existence (404)
//! 4. field validation (400)

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::error::{ApiError, ApiResult};
use super::response::{ProductEnvelope, ProductPage, StatsResponse};
use super::stats::RequestStats;
use crate::clients::{ActorClient, ProductClient};
use crate::model::{ProductId, ProductPatch};
use crate::query::{parse_list_params, run_query};
use crate::validation::{field_bag, parse_id, validate_new_product, validate_patch, FieldBag};

/// Façade over the product store.
#[derive(Clone)]
pub struct CatalogService {
    products: ProductClient,
}

impl CatalogService {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    /// `GET /products`
    #[instrument(skip(self))]
    pub async fn list(&self, params: &HashMap<String, String>) -> ApiResult<ProductPage> {
        let (filter, pagination) = parse_list_params(params)?;
        let snapshot = self.products.list().await?;
        let result = run_query(&snapshot, &filter, pagination);
        debug!(total = result.total, returned = result.records.len(), "Listed");

        Ok(ProductPage {
            page: pagination.page,
            limit: pagination.limit,
            total: result.total,
            products: result.records,
        })
    }

    /// `GET /products/:id`
    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> ApiResult<ProductEnvelope> {
        let id = parse_id(raw_id)?.ok_or(ApiError::NotFound)?;
        let product = self.products.get(id).await?.ok_or(ApiError::NotFound)?;
        Ok(product.into())
    }

    /// `POST /products`
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &[u8]) -> ApiResult<ProductEnvelope> {
        let fields = parse_body(body)?;
        let new_product = validate_new_product(&fields)?;
        let product = self.products.create_product(new_product).await?;
        info!(id = %product.id, "Product created");
        Ok(product.into())
    }

    /// `PUT /products/:id`: every field is replaced, using the creation rules.
    #[instrument(skip(self, body))]
    pub async fn replace(&self, raw_id: &str, body: &[u8]) -> ApiResult<ProductEnvelope> {
        let fields = parse_body(body)?;
        let id = self.existing_id(raw_id).await?;
        let replacement = validate_new_product(&fields)?;
        self.apply(id, ProductPatch::from(replacement)).await
    }

    /// `PATCH /products/:id`
    #[instrument(skip(self, body))]
    pub async fn patch(&self, raw_id: &str, body: &[u8]) -> ApiResult<ProductEnvelope> {
        let fields = parse_body(body)?;
        let id = self.existing_id(raw_id).await?;
        let patch = validate_patch(&fields)?;
        self.apply(id, patch).await
    }

    /// `DELETE /products/:id`
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> ApiResult<()> {
        let id = parse_id(raw_id)?.ok_or(ApiError::NotFound)?;
        let removed = self.products.delete(id).await?;
        info!(id = %removed.id, "Product deleted");
        Ok(())
    }

    /// `GET /stats`
    pub async fn stats(&self, stats: &RequestStats) -> ApiResult<StatsResponse> {
        Ok(StatsResponse {
            total_requests: stats.total_requests(),
            products_count: self.products.count().await?,
            last_request_time: stats.last_request_rfc3339(),
        })
    }

    async fn apply(&self, id: ProductId, patch: ProductPatch) -> ApiResult<ProductEnvelope> {
        let product = self.products.update_product(id, patch).await?;
        info!(id = %product.id, "Product updated");
        Ok(product.into())
    }

    /// Parses `raw_id` and confirms a product with that id exists.
    async fn existing_id(&self, raw_id: &str) -> ApiResult<ProductId> {
        let id = parse_id(raw_id)?.ok_or(ApiError::NotFound)?;
        match self.products.get(id).await? {
            Some(_) => Ok(id),
            None => Err(ApiError::NotFound),
        }
    }
}

/// Decodes a request body into a field bag. An empty body is an empty bag.
fn parse_body(body: &[u8]) -> ApiResult<FieldBag> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FieldBag::new());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::MalformedRequest("Invalid JSON".to_string()))?;
    Ok(field_bag(value))
}
