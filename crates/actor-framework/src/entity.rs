//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type (an order, a customer
//! account, …) implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//! It names the associated types for identifiers, creation payloads, actions,
//! context and errors, and exposes the hooks the actor calls while it owns the
//! record.
//!
//! # Store-assigned identity
//! Identifiers are handed out by the actor from a monotonically increasing
//! `u64` counter, so every `Id` type must be constructible from `u64`. The
//! store keeps records ordered by `Id`, which is why `Id: Ord`.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::unique_key`]: secondary key that must be unique across the store.
//! - [`ActorEntity::on_create`]: async validation after construction, before insert.
//!
//! The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be owned by a `ResourceActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may talk to other actors. The
/// `Context` type is injected into `run()` rather than `new()`, which lets
/// actors depend on each other's clients without construction-order problems.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by the actor on creation.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u64>;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// Enum of record-specific mutations (e.g. a status transition).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this record.
    ///
    /// One enum per actor rather than one per message: clients pattern match a
    /// single type, at the cost of some variants being unreachable for some
    /// actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its freshly assigned id and the payload.
    ///
    /// Runs synchronously before `on_create`. The context is available for
    /// things like secondary id sequences.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Secondary key that must be unique among all stored records
    /// (e.g. a normalized email address). `None` opts out.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the record is inserted.
    /// Returning an error aborts the creation; nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Apply a record-specific action. An error leaves the record untouched
    /// as long as the implementation only mutates after validating.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
