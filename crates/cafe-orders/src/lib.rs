//! # Cafe Orders
//!
//! Order lifecycle and admin synchronization for a food-delivery cafe.
//!
//! Customers place orders (a header plus line items); the kitchen's admin
//! dashboard polls the full order list, raises an alert for orders it has not
//! seen before and advances each order `pending → confirmed → delivered`.
//!
//! ## Layout
//!
//! - **[model]**: orders, line items, users and the status state machine.
//! - **[store]**: the persistence traits with an actor-backed in-memory
//!   implementation and a SQLite one.
//! - **[order_actor] / [user_actor]**: [`ResourceActor`](actor_framework::ResourceActor)
//!   entities behind the in-memory store, reached through [clients].
//! - **[service]**: validation and logging around the store, shared by every
//!   caller.
//! - **[dashboard]**: the admin session: polling, new-order detection, alert,
//!   views and stats.
//! - **[api]**: the `axum` HTTP surface.
//! - **[config] / [lifecycle]**: environment configuration, wiring and shutdown.

pub mod api;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod service;
pub mod store;
pub mod user_actor;
