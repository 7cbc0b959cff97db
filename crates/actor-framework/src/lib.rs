//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent record stores on top of Tokio.
//! Each record type (an order, a customer account) is owned by exactly one
//! actor task; everyone else talks to it through a cloneable client.
//!
//! ### Actor Model
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor, so every request is atomic
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record, its creation payload and its actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, id assignment, storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed request/response calls
//!
//! ## Store semantics
//!
//! - Ids come from a per-actor `u64` counter starting at 1 and are never reused.
//! - Records are append-only: create, get, list and typed actions. There is
//!   no delete.
//! - `list` returns records in ascending id order.
//! - A record may declare a [`unique_key`](ActorEntity::unique_key); a second
//!   record with the same key is rejected with [`FrameworkError::Conflict`].
//!
//! ## Context Injection Pattern
//!
//! An actor's dependencies are passed to `run()`, not `new()`. That lets one
//! actor hold another's client (orders check that their customer exists)
//! without caring which actor was constructed first.
//!
//! ```rust,ignore
//! let (customer_actor, customer_client) = ResourceActor::<Customer>::new(32);
//! let (order_actor, order_client) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(customer_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext::new(customer_client.clone())));
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module hands out a real [`ResourceClient`] backed by a channel
//! the test controls, so client wrappers and entity hooks can be exercised
//! without spawning their dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
