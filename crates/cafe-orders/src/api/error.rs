use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// An HTTP failure, rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Store failures are logged here and answered with `fallback` only.
    pub fn from_order(err: OrderError, fallback: &str) -> Self {
        match err {
            OrderError::Validation(_)
            | OrderError::UnknownStatus(_)
            | OrderError::UnknownCustomer(_) => Self::bad_request(err.to_string()),
            OrderError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            OrderError::InvalidTransition { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            OrderError::Store(e) => {
                tracing::error!(error = %e, "Order store error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }

    pub fn from_user(err: UserError, fallback: &str) -> Self {
        match err {
            UserError::Validation(message) => Self::bad_request(message),
            UserError::AlreadyExists(_) => Self::new(StatusCode::CONFLICT, "User already exists"),
            UserError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            UserError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            UserError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
            UserError::Store(e) => {
                tracing::error!(error = %e, "User store error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderStatus};
    use crate::store::StoreError;

    #[test]
    fn order_errors_map_to_statuses() {
        let cases = [
            (OrderError::Validation("Order items are required".into()), StatusCode::BAD_REQUEST),
            (OrderError::UnknownStatus("shipped".into()), StatusCode::BAD_REQUEST),
            (OrderError::NotFound(OrderId(9)), StatusCode::NOT_FOUND),
            (
                OrderError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Delivered,
                },
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from_order(err, "Failed").status, status);
        }
    }

    #[test]
    fn store_details_are_not_exposed() {
        let err = OrderError::Store(StoreError::Corrupt("bad decimal in row 7".into()));
        let api = ApiError::from_order(err, "Failed to fetch orders");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Failed to fetch orders");
    }

    #[test]
    fn duplicate_user_is_a_conflict() {
        let api = ApiError::from_user(
            UserError::AlreadyExists("a@b.uz".into()),
            "Internal server error",
        );
        assert_eq!(api, ApiError::new(StatusCode::CONFLICT, "User already exists"));
    }
}
