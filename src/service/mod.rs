//! # Order Service
//!
//! The operations the API exposes, composed from the order store, the broadcaster and
//! the execution scheduler. Handlers hold an [`OrderService`] and nothing else.

use crate::clients::OrderClient;
use crate::execution::{ExecutionHandle, ExecutionScheduler};
use crate::model::{Order, OrderEvent, OrderId};
use crate::order_actor::OrderError;
use actor_framework::Broadcaster;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct OrderService {
    orders: OrderClient,
    events: Broadcaster<OrderEvent>,
    scheduler: ExecutionScheduler,
}

impl OrderService {
    pub fn new(orders: OrderClient, events: Broadcaster<OrderEvent>, scheduler: ExecutionScheduler) -> Self {
        Self {
            orders,
            events,
            scheduler,
        }
    }

    /// Stores a new `PENDING` order and, when `execute` is set, schedules its execution.
    ///
    /// The order is returned as stored; its execution happens later in the background.
    /// The returned handle may be dropped without affecting the task.
    #[instrument(skip(self))]
    pub async fn place_order(&self, execute: bool) -> Result<(Order, Option<ExecutionHandle>), OrderError> {
        let order = self.orders.create_order().await?;
        info!(order_id = %order.id, "Order placed");

        let execution = execute.then(|| self.scheduler.schedule_execution(order.id));
        Ok((order, execution))
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.get_order(id).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.list_orders().await
    }

    /// Cancels a `PENDING` order. Its lifecycle task, if any, finds the order gone
    /// and ends without executing it.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        let order = self.orders.cancel_order(id).await?;
        info!("Order cancelled");
        Ok(order)
    }

    /// The broadcaster that carries every order status change.
    pub fn events(&self) -> &Broadcaster<OrderEvent> {
        &self.events
    }

    pub fn scheduler(&self) -> &ExecutionScheduler {
        &self.scheduler
    }
}
