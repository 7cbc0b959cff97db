//! # User Actor
//!
//! In-memory owner of the registered customer accounts.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`UserRecord`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Key Features
//!
//! - **No dependencies**: the context is `()`
//! - **Unique email**: a second account with the same normalized email is
//!   rejected with [`UserError::AlreadyExists`]
//! - **No actions**: accounts are read-only once registered

pub mod entity;
pub mod error;

pub use entity::UserAction;
pub use error::*;

use crate::clients::UserClient;
use crate::model::UserRecord;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new() -> (ResourceActor<UserRecord>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, UserClient::new(generic_client))
}
