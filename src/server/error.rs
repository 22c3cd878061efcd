//! HTTP error responses.

use crate::order_actor::OrderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Body of every error response: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// An [`OrderError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub OrderError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            OrderError::NotFound(_) | OrderError::Empty => StatusCode::NOT_FOUND,
            OrderError::InvalidState { .. } => StatusCode::CONFLICT,
            OrderError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            OrderError::InvalidState { .. } => "Cannot cancel non-pending order".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self.0, "Request failed");
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderStatus};

    #[test]
    fn errors_map_to_status_codes() {
        let id = OrderId::new_v4();
        let cases = [
            (OrderError::NotFound(id.to_string()), StatusCode::NOT_FOUND),
            (OrderError::Empty, StatusCode::NOT_FOUND),
            (
                OrderError::InvalidState {
                    id,
                    status: OrderStatus::Executed,
                    requested: OrderStatus::Cancelled,
                },
                StatusCode::CONFLICT,
            ),
            (
                OrderError::ActorCommunicationError("Actor closed".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code(), status);
        }
    }

    #[test]
    fn rejected_cancellation_has_fixed_detail() {
        let err = ApiError(OrderError::InvalidState {
            id: OrderId::new_v4(),
            status: OrderStatus::Cancelled,
            requested: OrderStatus::Cancelled,
        });
        assert_eq!(err.detail(), "Cannot cancel non-pending order");
        assert_eq!(ApiError(OrderError::Empty).detail(), "Orders are empty");
    }
}
