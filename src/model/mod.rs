//! Pure data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod product;

pub use product::*;
