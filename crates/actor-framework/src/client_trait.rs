//! # ActorClient Trait
//!
//! Common surface for record-specific client wrappers: default `get` and
//! `list` built on top of the wrapped `ResourceClient`, with errors mapped into
//! the wrapper's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the read operations.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Order> for OrderClient {
///     type Error = OrderError;
///     fn inner(&self) -> &ResourceClient<Order> { &self.inner }
///     fn map_error(e: FrameworkError) -> OrderError { /* ... */ }
/// }
///
/// // get() and list() are provided.
/// let all = order_client.list().await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the record-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot every record, ascending by id.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
