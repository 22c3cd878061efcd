//! # Order Client
//!
//! Provides the order store operations on top of a `ResourceClient<Order>`,
//! translating framework errors into [`OrderError`].
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Publishing is not this client's concern: the actor announces every status
/// change itself (see [`crate::order_actor::entity`]).
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new `PENDING` order.
    #[instrument(skip(self))]
    pub async fn create_order(&self) -> Result<Order, OrderError> {
        info!("Sending create_order to actor");
        Ok(self.inner.create(OrderCreate).await?)
    }

    /// Fetches one order, failing with [`OrderError::NotFound`] if it is absent.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Lists every stored order.
    ///
    /// An empty store is reported as [`OrderError::Empty`] rather than an empty list.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        debug!(count = orders.len(), "Listed orders");
        if orders.is_empty() {
            return Err(OrderError::Empty);
        }
        Ok(orders)
    }

    /// Moves an order to `status`; the transition must be legal.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        Ok(self.inner.update(id, status).await?)
    }

    /// Cancels a `PENDING` order and removes it from the store.
    ///
    /// Returns the order in its final `CANCELLED` state.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        info!("Sending cancel_order to actor");
        Ok(self.inner.delete(id).await?)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_empty_store_lists_as_error() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(Vec::new());

        let client = OrderClient::new(mock.client());
        assert_eq!(client.list_orders().await, Err(OrderError::Empty));
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let id = OrderId::new_v4();
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(id).return_ok(None);

        let client = OrderClient::new(mock.client());
        assert_eq!(client.get_order(id).await, Err(OrderError::NotFound(id.to_string())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_cancel_keeps_its_variant() {
        let id = OrderId::new_v4();
        let rejection = OrderError::InvalidState {
            id,
            status: OrderStatus::Executed,
            requested: OrderStatus::Cancelled,
        };
        let mut mock = MockClient::<Order>::new();
        mock.expect_delete(id)
            .return_err(FrameworkError::EntityError(Box::new(rejection.clone())));

        let client = OrderClient::new(mock.client());
        assert_eq!(client.cancel_order(id).await, Err(rejection));
        mock.verify();
    }
}
