//! # Product Actor
//!
//! The record store for products: a [`ResourceActor<Product>`] seeded with the startup
//! catalog and wrapped in a [`ProductClient`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the seeded actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use product_catalog::product_actor;
//! use product_catalog::model::ProductId;
//! use product_catalog::clients::ActorClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32)?;
//!     tokio::spawn(actor.run(()));
//!
//!     let first = client.get(ProductId(1)).await?.expect("seeded");
//!     assert_eq!(first.name, "Product 1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::{NewProduct, Product};
use tracing::info;

/// Number of products loaded at startup.
pub const SEED_SIZE: u64 = 30;

/// Categories the seed catalog cycles through, indexed by `id % 5`.
pub const SEED_CATEGORIES: [&str; 5] = ["Electronics", "Home", "Office", "Sports", "Kids"];

/// The fixed startup catalog. Entry `n` (0-based) becomes product id `n + 1`.
pub fn seed_products() -> Vec<NewProduct> {
    (1..=SEED_SIZE)
        .map(|id| NewProduct {
            name: format!("Product {}", id),
            price: 10.0 + id as f64 * 3.0,
            category: SEED_CATEGORIES[(id % SEED_CATEGORIES.len() as u64) as usize].to_string(),
            in_stock: id % 2 == 0,
        })
        .collect()
}

/// Creates the seeded Product actor and its client.
pub fn new(buffer_size: usize) -> Result<(ResourceActor<Product>, ProductClient), ProductError> {
    let (mut actor, generic_client) = ResourceActor::new(buffer_size);
    let seeded = actor.seed(seed_products())?;
    info!(seeded, "Product store seeded");

    Ok((actor, ProductClient::new(generic_client)))
}
