//! Generic actor framework for owning a record collection.
//!
//! This module provides the building blocks for a single-owner store: one task owns the
//! collection and serializes every mutation, while any number of cloned clients talk to it
//! over a channel.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored record types implement
//! - [`ResourceActor`] - Generic actor that owns the collection and allocates ids
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
