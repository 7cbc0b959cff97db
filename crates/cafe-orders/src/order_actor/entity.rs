//! [`ActorEntity`] implementation for [`OrderRecord`].
//!
//! Creation builds the header and its line items in one step, so an order and
//! its items are inserted together or not at all. The only mutation is a
//! status transition, validated by [`OrderStatus::transition_to`].

use super::{OrderAction, OrderContext, OrderError};
use crate::model::{
    LineItem, LineItemId, Order, OrderCreate, OrderId, OrderRecord, OrderStatus,
};
use crate::store::StoreError;
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::Ordering;
use tracing::debug;

#[async_trait]
impl ActorEntity for OrderRecord {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    /// Stamps both timestamps with the current time, starts the order as
    /// `pending` and hands every line item an id from the shared sequence.
    fn from_create_params(
        id: OrderId,
        params: OrderCreate,
        ctx: &OrderContext,
    ) -> Result<Self, OrderError> {
        let now = Utc::now();
        let items = params
            .items
            .into_iter()
            .map(|item| LineItem {
                id: LineItemId(ctx.line_item_ids.fetch_add(1, Ordering::SeqCst)),
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        Ok(Self {
            order: Order {
                id,
                user_id: params.user_id,
                total_amount: params.total_amount,
                status: OrderStatus::Pending,
                delivery_address: params.delivery_address,
                latitude: params.latitude,
                longitude: params.longitude,
                phone: params.phone,
                notes: params.notes,
                payment_method: params.payment_method,
                created_at: now,
                updated_at: now,
            },
            items,
        })
    }

    /// Checks that the owner, if any, is a registered user.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let Some(user_id) = self.order.user_id else {
            return Ok(());
        };
        debug!(%user_id, "Checking order owner");
        match ctx.users.get(user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::UnknownCustomer(user_id)),
            Err(e) => Err(OrderError::Store(StoreError::Unavailable(e.to_string()))),
        }
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Transition(target) => {
                let next = self.order.status.transition_to(target)?;
                self.order.status = next;
                self.order.updated_at = Utc::now();
                Ok(self.order.clone())
            }
        }
    }
}
