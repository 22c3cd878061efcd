//! Error types for the Order actor.

use crate::model::{OrderId, OrderStatus};
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order {0} not found")]
    NotFound(String),

    /// Listing found no orders at all.
    #[error("Orders are empty")]
    Empty,

    /// The order's current status does not allow the requested transition.
    #[error("Cannot move order {id} from {status} to {requested}")]
    InvalidState {
        id: OrderId,
        status: OrderStatus,
        requested: OrderStatus,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
