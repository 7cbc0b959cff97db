//! Error types for the Order actor and the order write path.

use crate::model::{ModelError, OrderId, OrderStatus, UserId};
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order data provided is invalid. Raised before any store write.
    #[error("{0}")]
    Validation(String),

    /// The requested status string is not one of the three lifecycle states.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// The requested status is not the next step of the lifecycle.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order names an owner that is not a registered user.
    #[error("Unknown customer: {0}")]
    UnknownCustomer(UserId),

    /// An underlying store error occurred.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ModelError> for OrderError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(message) => OrderError::Validation(message),
            ModelError::UnknownStatus(status) => OrderError::UnknownStatus(status),
            ModelError::InvalidTransition { from, to } => OrderError::InvalidTransition { from, to },
        }
    }
}
