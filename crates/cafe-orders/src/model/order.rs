//! Represents a customer order and its line items.
//!
//! # Actor Framework
//! [`OrderRecord`] implements the [`ActorEntity`](actor_framework::ActorEntity)
//! trait, allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor)
//! in the in-memory store.
//!
//! See `order_actor::entity` for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Status transitions ([`OrderAction`](crate::order_actor::OrderAction))

use crate::model::{ModelError, OrderStatus, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Store-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Rendered as the bare number; the dashboard search matches against it.
impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub u64);

impl Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One menu item in an order. The price is the unit price at the time the
/// order was placed and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub menu_item_id: u64,
    pub quantity: u32,
    pub price: Decimal,
}

/// A line item as submitted by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub menu_item_id: u64,
    pub quantity: u32,
    pub price: Decimal,
}

/// Payload for creating a new order.
///
/// `total_amount` is trusted client input; it is expected to equal the sum of
/// `quantity * price` but is not recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    /// `None` for guest checkout.
    pub user_id: Option<UserId>,
    pub items: Vec<NewLineItem>,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: String,
    pub notes: Option<String>,
    pub payment_method: String,
}

impl OrderCreate {
    /// Rejects malformed input. Runs before anything touches the store.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.items.is_empty() {
            return Err(ModelError::Validation("Order items are required".into()));
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity == 0) {
            return Err(ModelError::Validation(format!(
                "Quantity for menu item {} must be positive",
                item.menu_item_id
            )));
        }
        if self.items.iter().any(|i| i.price.is_sign_negative()) {
            return Err(ModelError::Validation("Item prices cannot be negative".into()));
        }
        if self.total_amount.is_sign_negative() {
            return Err(ModelError::Validation("Total amount cannot be negative".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(ModelError::Validation("Phone is required".into()));
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(ModelError::Validation(
                "Latitude and longitude must be given together".into(),
            ));
        }
        Ok(())
    }
}

/// Order header, as returned by creation and status updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order joined with its line items and the owner's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    /// Ascending by line item id; empty when the order has no items.
    pub items: Vec<LineItem>,
}

/// What the in-memory order actor owns: the header plus its items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order: Order,
    pub items: Vec<LineItem>,
}
