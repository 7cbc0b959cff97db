//! Store backed by the order and user actors.

use super::{sort_newest_first, OrderStore, UserStore};
use crate::clients::{OrderClient, UserClient};
use crate::model::{
    NewUser, Order, OrderCreate, OrderDetails, OrderId, OrderStatus, User, UserId, UserRecord,
};
use crate::order_actor::OrderError;
use crate::store::StoreError;
use crate::user_actor::UserError;
use actor_framework::ActorClient;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::instrument;

/// In-memory store: each request is forwarded to the owning actor, so every
/// single write is atomic without locks.
#[derive(Clone)]
pub struct MemoryStore {
    orders: OrderClient,
    users: UserClient,
}

impl MemoryStore {
    pub fn new(orders: OrderClient, users: UserClient) -> Self {
        Self { orders, users }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        let id = self.orders.create_order(params).await?;
        self.orders
            .get(id)
            .await?
            .map(|record| record.order)
            .ok_or_else(|| {
                OrderError::Store(StoreError::Unavailable(format!(
                    "order {id} vanished after creation"
                )))
            })
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, owner: Option<UserId>) -> Result<Vec<OrderDetails>, OrderError> {
        let records = self.orders.list().await?;
        let users: HashMap<UserId, User> = self
            .users
            .list()
            .await
            .map_err(|e| OrderError::Store(StoreError::Unavailable(e.to_string())))?
            .into_iter()
            .map(|r| (r.user.id, r.user))
            .collect();

        let mut orders: Vec<OrderDetails> = records
            .into_iter()
            .filter(|r| owner.is_none() || r.order.user_id == owner)
            .map(|r| {
                let user = r.order.user_id.and_then(|id| users.get(&id));
                let mut items = r.items;
                items.sort_by_key(|i| i.id);
                OrderDetails {
                    user_name: user.map(|u| u.name.clone()),
                    user_email: user.map(|u| u.email.clone()),
                    order: r.order,
                    items,
                }
            })
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn update_status(&self, id: OrderId, target: OrderStatus) -> Result<Order, OrderError> {
        self.orders.transition(id, target).await
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, params: NewUser) -> Result<User, UserError> {
        let id = self.users.create_user(params).await?;
        self.users
            .get(id)
            .await?
            .map(|record| record.user)
            .ok_or(UserError::NotFound(id))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        self.users.find_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .map(|record| record.user)
            .collect())
    }
}
