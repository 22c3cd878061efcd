//! # Order Actor
//!
//! The order store: a [`ResourceActor`] holding every live [`Order`], with the
//! broadcaster injected as its context.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use actor_framework::BroadcastActor;
//! use order_broadcast::clients::OrderClient;
//! use order_broadcast::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (broadcast_actor, events) = BroadcastActor::new(32, 32);
//!     tokio::spawn(broadcast_actor.run());
//!
//!     let (actor, generic_client) = order_actor::new(32);
//!     tokio::spawn(actor.run(events));
//!
//!     let orders = OrderClient::new(generic_client);
//!     let order = orders.create_order().await?;
//!     assert_eq!(orders.get_order(order.id).await?, order);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Order, OrderId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size, OrderId::new_v4)
}
