//! # Generic Messages
//!
//! Request types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to a `ResourceActor`.
///
/// Records owned by an actor are append-only: they are created, read, listed
/// and mutated through typed actions, but never removed.
///
/// - **Create**: builds a record from [`ActorEntity::Create`] and assigns its id.
/// - **Get**: fetches one record by id.
/// - **List**: snapshots every record, in ascending id order.
/// - **Action**: runs an [`ActorEntity::Action`] against one record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
