//! # Order Actor
//!
//! In-memory owner of every order and its line items.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`OrderRecord`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor's context carries a [`UserClient`] so `on_create` can reject
//! orders whose owner does not exist, plus the line item id sequence.
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new();
//! let (order_actor, order_client) = order_actor::new();
//!
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext::new(user_client.clone())));
//!
//! let id = order_client.create_order(params).await?;
//! let confirmed = order_client.transition(id, OrderStatus::Confirmed).await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{OrderClient, UserClient};
use crate::model::{OrderRecord, OrderStatus};
use actor_framework::ResourceActor;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Mutations an order accepts once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Move to the given status; only `next(current)` is accepted.
    Transition(OrderStatus),
}

/// Dependencies injected into the Order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub users: UserClient,
    pub line_item_ids: Arc<AtomicU64>,
}

impl OrderContext {
    pub fn new(users: UserClient) -> Self {
        Self {
            users,
            line_item_ids: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<OrderRecord>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}
