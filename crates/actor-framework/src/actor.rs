//! # Generic Actor Server
//!
//! `ResourceActor` owns a collection of records and processes requests for
//! them one at a time, so no record is ever touched by two tasks at once.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of records.
///
/// # Architecture Note
/// This is the "server" half of the actor: it owns the `store` and the
/// receiving end of the channel. Requests are handled sequentially inside a
/// single task, which makes every request atomic with respect to the others
/// without any `Mutex` around the store.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Order>::new(32);
/// tokio::spawn(actor.run(order_context));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: takes the next id from the counter, calls
///   `from_create_params`, rejects duplicates of `unique_key`, runs
///   `on_create`, then inserts. A failed creation still consumes its id.
/// * **Get**: clones the record if present.
/// * **List**: clones every record, ascending by id.
/// * **Action**: runs `handle_action` against the stored record in place.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "cafe_orders::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params, context)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some(key) = item.unique_key() {
            let taken = self
                .store
                .values()
                .any(|existing| existing.unique_key().as_deref() == Some(key.as_str()));
            if taken {
                return Err(FrameworkError::Conflict(key));
            }
        }

        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        self.store.insert(id.clone(), item);
        Ok(id)
    }
}
