use crate::model::{Order, OrderCreate, OrderDetails, OrderId, OrderStatus, UserId};
use crate::order_actor::OrderError;
use crate::store::OrderStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The order write and read paths, independent of the store backend.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Validates, then inserts the order and its items in one step.
    #[instrument(skip(self, params), fields(items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        if let Err(e) = params.validate() {
            warn!(error = %e, "Rejected order");
            return Err(e.into());
        }
        let order = self.store.create_order(params).await?;
        info!(order_id = %order.id, total = %order.total_amount, "Order created");
        Ok(order)
    }

    pub async fn list_orders(&self, owner: Option<UserId>) -> Result<Vec<OrderDetails>, OrderError> {
        self.store.list_orders(owner).await
    }

    /// Write path for a raw status string, as received from outside.
    pub async fn update_status(&self, id: OrderId, status: &str) -> Result<Order, OrderError> {
        let target: OrderStatus = status.parse()?;
        self.transition(id, target).await
    }

    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, target: OrderStatus) -> Result<Order, OrderError> {
        let order = self.store.update_status(id, target).await?;
        info!(order_id = %id, status = %order.status, "Order status updated");
        Ok(order)
    }
}
