//! The [`Order`] record and the event published whenever its status changes.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) (see
//! [`crate::order_actor`]), so the order store is a
//! [`ResourceActor`](actor_framework::ResourceActor) keyed by [`OrderId`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe identifier for Orders (random UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle status of an order.
///
/// `Pending` is the only state with outgoing transitions:
///
/// ```text
/// PENDING --(lifecycle task)--> EXECUTED
/// PENDING --(cancellation)----> CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Executed,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status may move to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Executed) | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Executed => "EXECUTED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new order in `PENDING` status.
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
        }
    }

    /// The event announcing this order's current status.
    pub fn event(&self) -> OrderEvent {
        OrderEvent {
            order_id: self.id,
            status: self.status,
        }
    }
}

/// Payload for creating a new order. Orders carry no client-supplied data.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCreate;

/// Status change pushed to every subscriber.
///
/// Serialized as `{"orderId": "...", "status": "PENDING"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_orders_move() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Executed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        for terminal in [Executed, Cancelled] {
            for next in [Pending, Executed, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn event_serializes_with_wire_names() {
        let order = Order::new(OrderId::new_v4());
        let json = serde_json::to_value(order.event()).unwrap();
        assert_eq!(json["orderId"], order.id.to_string());
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn order_ids_parse_back() {
        let id = OrderId::new_v4();
        assert_eq!(id.to_string().parse::<OrderId>().unwrap(), id);
        assert!("nonexistent".parse::<OrderId>().is_err());
    }
}
