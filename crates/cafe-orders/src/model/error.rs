//! Rejections raised by the model itself, before any store is involved.

use crate::model::OrderStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Malformed order input.
    #[error("{0}")]
    Validation(String),

    /// Not one of the three lifecycle states.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// `to` is not the next step after `from`.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}
