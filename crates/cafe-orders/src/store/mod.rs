//! # Order Store
//!
//! The persistence boundary. Both backends implement the same two traits and
//! are picked at startup from configuration:
//!
//! - [`MemoryStore`] - the order and user actors, nothing survives a restart
//! - [`SqliteStore`] - a SQLite file (or in-memory database) via `rusqlite`
//!
//! Contract shared by both:
//!
//! - order creation writes the header and all line items atomically, and
//!   rejects an owner that is not a registered user;
//! - `list_orders` returns orders newest-first (ties broken by id, highest
//!   first), each with its items ascending by id and the owner's name/email;
//! - `update_status` accepts only `next(current)` and refreshes `updated_at`.
//!
//! Input validation is the caller's job (see [`OrderService`](crate::service::OrderService)).

pub mod error;
pub mod memory;
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::{NewUser, Order, OrderCreate, OrderDetails, OrderId, OrderStatus, User, UserId, UserRecord};
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the header and its items; returns the header.
    async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError>;

    /// Every order (or only `owner`'s) with its items, newest first.
    async fn list_orders(&self, owner: Option<UserId>) -> Result<Vec<OrderDetails>, OrderError>;

    /// Moves an order to `target` if that is the next lifecycle step.
    async fn update_status(&self, id: OrderId, target: OrderStatus) -> Result<Order, OrderError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`UserError::AlreadyExists`] when the email is taken.
    async fn create_user(&self, params: NewUser) -> Result<User, UserError>;

    /// Email lookup is case-insensitive.
    async fn find_credentials(&self, email: &str) -> Result<Option<UserRecord>, UserError>;

    /// Every user, ascending by id.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Sort key shared by both backends for the newest-first order listing.
pub(crate) fn sort_newest_first(orders: &mut [OrderDetails]) {
    orders.sort_by(|a, b| {
        b.order
            .created_at
            .cmp(&a.order.created_at)
            .then(b.order.id.cmp(&a.order.id))
    });
}
