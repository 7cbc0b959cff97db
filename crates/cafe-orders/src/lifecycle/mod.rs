//! # System Lifecycle & Orchestration
//!
//! Wires the configured store backend, the services and the optional admin
//! dashboard together, and tears them down again.
//!
//! ## Startup
//!
//! With the in-memory backend the user and order actors are created first and
//! started with their contexts injected afterwards, so the order actor can hold
//! a [`UserClient`](crate::clients::UserClient) without a construction cycle:
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new();
//! let (order_actor, order_client) = order_actor::new();
//!
//! let user_handle = tokio::spawn(user_actor.run(()));
//! let order_handle = tokio::spawn(order_actor.run(OrderContext::new(user_client.clone())));
//! ```
//!
//! With SQLite there are no actors; the store is opened and migrated instead.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the dashboard handle** - its loop stops polling and exits
//! 2. **Drop the services** - the last clients go away, closing actor channels
//! 3. **Await every task** - actors see `recv() == None` and return
//!
//! The dependency graph (dashboard → services → order actor → user actor) is
//! acyclic, so closing channels is enough to stop everything.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use tracing::*;
