use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products. Serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be stored by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`NewProduct`])
/// - Update parameters ([`ProductPatch`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (allocated by the store)
    /// * `fields` - Already validated field values
    pub fn new(id: ProductId, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            category: fields.category,
            in_stock: fields.in_stock,
        }
    }

    /// Overwrites the fields named in `patch`; the id never changes.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }
}

/// Validated fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Sparse set of validated field changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
    }
}

// A full replacement is a patch that names every field.
impl From<NewProduct> for ProductPatch {
    fn from(fields: NewProduct) -> Self {
        Self {
            name: Some(fields.name),
            price: Some(fields.price),
            category: Some(fields.category),
            in_stock: Some(fields.in_stock),
        }
    }
}
