//! Entity trait implementation for the Order domain type.
//!
//! Every status change is announced from inside the actor, right after the store is
//! mutated and before the next request is handled. Observers therefore see exactly one
//! event per transition, in the order the transitions happened.

use crate::model::{Order, OrderCreate, OrderEvent, OrderStatus};
use crate::order_actor::OrderError;
use actor_framework::{ActorEntity, Broadcaster};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = crate::model::OrderId;
    type Create = OrderCreate;
    type Update = OrderStatus;
    type Context = Broadcaster<OrderEvent>;
    type Error = OrderError;

    fn from_create_params(id: Self::Id, _params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::new(id))
    }

    /// Announces the new `PENDING` order.
    async fn on_create(&mut self, events: &Self::Context) -> Result<(), Self::Error> {
        announce(events, self.event()).await;
        Ok(())
    }

    /// Applies a status transition and announces it.
    async fn on_update(&mut self, status: OrderStatus, events: &Self::Context) -> Result<(), Self::Error> {
        self.transition(status)?;
        announce(events, self.event()).await;
        Ok(())
    }

    /// Removing an order cancels it: only `PENDING` orders may go, and the
    /// `CANCELLED` status is announced before the record disappears.
    async fn on_delete(&mut self, events: &Self::Context) -> Result<(), Self::Error> {
        self.transition(OrderStatus::Cancelled)?;
        announce(events, self.event()).await;
        Ok(())
    }
}

impl Order {
    fn transition(&mut self, requested: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(requested) {
            return Err(OrderError::InvalidState {
                id: self.id,
                status: self.status,
                requested,
            });
        }
        self.status = requested;
        Ok(())
    }
}

/// Best-effort publish: delivery problems never fail the mutation that caused them.
async fn announce(events: &Broadcaster<OrderEvent>, event: OrderEvent) {
    match events.publish(event).await {
        Ok(report) => debug!(
            order_id = %event.order_id,
            status = %event.status,
            delivered = report.delivered,
            dropped = report.dropped,
            "Published"
        ),
        Err(e) => warn!(order_id = %event.order_id, error = %e, "Broadcaster unavailable, event lost"),
    }
}
