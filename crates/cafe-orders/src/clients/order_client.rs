//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<OrderRecord>` and maps framework errors back to
//! [`OrderError`].
use crate::model::{Order, OrderCreate, OrderId, OrderRecord, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use crate::store::StoreError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
///
/// Owner validation happens in the Order actor's `on_create` hook; status
/// legality in its action handler.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<OrderRecord>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<OrderRecord>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Moves the order to `target`, returning the updated header.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, target: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Transition(target))
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => OrderError::NotFound(id),
                other => Self::map_error(other),
            })
    }
}

#[async_trait]
impl ActorClient<OrderRecord> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<OrderRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(other) => OrderError::Store(StoreError::Unavailable(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn transition_sends_the_target_status() {
        let (client, mut receiver) = create_mock_client::<OrderRecord>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move {
            order_client
                .transition(OrderId(7), OrderStatus::Confirmed)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(7));
        assert_eq!(action, OrderAction::Transition(OrderStatus::Confirmed));

        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(OrderError::NotFound(OrderId(7)))));
    }

    #[tokio::test]
    async fn entity_errors_come_back_typed() {
        let (client, mut receiver) = create_mock_client::<OrderRecord>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move {
            order_client
                .transition(OrderId(1), OrderStatus::Delivered)
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        let rejected = OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(rejected))))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            })
        ));
    }

    #[tokio::test]
    async fn closed_actor_is_a_store_failure() {
        let (client, receiver) = create_mock_client::<OrderRecord>(10);
        drop(receiver);

        let result = OrderClient::new(client).list().await;
        assert!(matches!(result, Err(OrderError::Store(StoreError::Unavailable(_)))));
    }
}
