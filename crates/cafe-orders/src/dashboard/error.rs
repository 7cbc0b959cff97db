use crate::model::OrderId;
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Admin credential mismatch. No lockout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid admin password")]
    InvalidPassword,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The order is delivered; there is nothing to advance to.
    #[error("Order {0} has no further status")]
    NoFurtherTransition(OrderId),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Dashboard closed")]
    Closed,
}
