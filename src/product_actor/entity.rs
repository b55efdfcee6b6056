//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Product`] to be stored by the generic [`crate::framework::ResourceActor`].
//!
//! The store trusts its caller: payloads arrive already validated by
//! [`crate::validation`], so construction and updates cannot fail here.

use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = NewProduct;
    type Update = ProductPatch;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from validated fields.
    fn from_create_params(id: ProductId, params: NewProduct) -> Result<Self, ProductError> {
        Ok(Self::new(id, params))
    }

    /// Applies a sparse patch.
    ///
    /// # Fields Updated
    /// Only the fields present in the patch; `id` is never touched.
    async fn on_update(&mut self, update: ProductPatch, _ctx: &()) -> Result<(), ProductError> {
        self.apply(update);
        Ok(())
    }
}
