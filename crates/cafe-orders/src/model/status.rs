//! The three-state order lifecycle.
//!
//! ```text
//! pending ──► confirmed ──► delivered
//! ```
//!
//! Transitions are forward-only and one step at a time: the only legal target
//! for an order is `next(current)`.

use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// The status an operator can advance to, or `None` once delivered.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Validates a write of `target` against the current status.
    ///
    /// Same-status writes, skips and backward moves are all rejected.
    pub fn transition_to(self, target: OrderStatus) -> Result<OrderStatus, ModelError> {
        if self.next() == Some(target) {
            Ok(target)
        } else {
            Err(ModelError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"Pending"` is not a status.
impl FromStr for OrderStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_from_pending_walks_the_whole_lifecycle() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            status = status.transition_to(next).unwrap();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Delivered
            ]
        );
        assert!(status.is_terminal());
    }

    #[test]
    fn only_the_next_status_is_accepted() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let result = from.transition_to(to);
                if from.next() == Some(to) {
                    assert_eq!(result.unwrap(), to);
                } else {
                    assert!(matches!(
                        result,
                        Err(ModelError::InvalidTransition { from: f, to: t }) if f == from && t == to
                    ));
                }
            }
        }
    }

    #[test]
    fn parsing_is_exact() {
        assert_eq!("confirmed".parse::<OrderStatus>().unwrap(), OrderStatus::Confirmed);
        assert!(matches!(
            "Delivered".parse::<OrderStatus>(),
            Err(ModelError::UnknownStatus(s)) if s == "Delivered"
        ));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"delivered\""
        );
    }
}
