//! # HTTP API
//!
//! JSON routes over the order and user services:
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /api/orders` | [`orders::create_order`] |
//! | `GET /api/orders?userId=` | [`orders::list_orders`] |
//! | `PATCH /api/orders/{id}` | [`orders::update_order`] |
//! | `GET /api/admin/users` | [`users::list_users`] |
//! | `POST /api/auth/register` | [`users::register`] |
//! | `POST /api/auth/login` | [`users::login`] |
//!
//! Every failure is `{"error": "..."}` with a matching status code.

pub mod error;
pub mod orders;
pub mod users;

pub use error::ApiError;

use crate::service::{OrderService, UserService};
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub users: UserService,
}

impl AppState {
    pub fn new(orders: OrderService, users: UserService) -> Self {
        Self { orders, users }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/api/orders/{id}", patch(orders::update_order))
        .route("/api/admin/users", get(users::list_users))
        .route("/api/auth/register", post(users::register))
        .route("/api/auth/login", post(users::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
