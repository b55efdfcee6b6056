//! # Product Catalog
//!
//! > **An in-memory product catalog with filtered, paginated reads and validated writes.**
//!
//! The collection is owned by a single store actor running in its own Tokio task. HTTP
//! handlers never touch it directly: they go through a validating façade that talks to
//! the actor over a channel.
//!
//! ## 🏗️ Design
//!
//! ### Single owner, many readers
//! The store is a [`ResourceActor`](framework::ResourceActor) that processes one message at
//! a time. Every create, patch or delete finishes before the next request observes the
//! collection, and reads receive a consistent snapshot. No locks guard the records.
//!
//! ### Untyped in, typed through
//! Request bodies and query strings are untyped. The [`validation`] and [`query`] modules
//! turn them into [`NewProduct`](model::NewProduct), [`ProductPatch`](model::ProductPatch),
//! [`ProductFilter`](query::ProductFilter) and [`Pagination`](query::Pagination) before
//! anything reaches the store.
//!
//! ### Errors are values
//! Expected failures (bad id, invalid field, unknown product) travel as `Result`s and are
//! turned into responses once, by [`ApiError`](api::ApiError). Only an unreachable store
//! produces a 500, logged with its detail and reported with a generic message.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`] - generic store actor, client and mocks
//! - [`model`] - [`Product`](model::Product) and its payloads
//! - [`product_actor`] - the seeded product store
//! - [`clients`] - [`ProductClient`](clients::ProductClient), the typed handle to the store
//! - [`validation`] - field rules for create / replace / patch, id parsing
//! - [`query`] - filter predicates and pagination
//! - [`api`] - request façade, axum routes and server
//! - [`lifecycle`] - configuration, tracing setup, startup and shutdown
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --port 3002
//! curl 'http://127.0.0.1:3002/products?minPrice=50&limit=5&page=2'
//! ```

pub mod api;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod query;
pub mod validation;
