//! # Order Broadcast
//!
//! A live order service: orders are placed over HTTP, age from `PENDING` to
//! `EXECUTED` after a random delay unless cancelled first, and every status change is
//! pushed to all connected WebSocket subscribers as `{"orderId": ..., "status": ...}`.
//!
//! ## Core Components
//!
//! - **[model]**: [`Order`](model::Order), [`OrderStatus`](model::OrderStatus) and the
//!   [`OrderEvent`](model::OrderEvent) sent to subscribers.
//! - **[order_actor]**: the order store, a [`ResourceActor`](actor_framework::ResourceActor)
//!   whose hooks validate every transition and publish it.
//! - **[clients]**: [`OrderClient`](clients::OrderClient), the typed interface to the store.
//! - **[execution]**: the per-order lifecycle tasks.
//! - **[service]**: [`OrderService`](service::OrderService), the operations the API exposes.
//! - **[lifecycle]**: [`OrderSystem`](lifecycle::OrderSystem) wiring, shutdown and tracing.
//! - **[server]**: the axum routes, including the `/ws` subscription.
//! - **[config]**: [`ServiceConfig`](config::ServiceConfig).
//!
//! ## Ordering
//!
//! The store and the subscriber registry are actors, so each processes one request at
//! a time. Publishing happens inside the store's hooks: an order's `PENDING` event is
//! always delivered before its `EXECUTED` or `CANCELLED` event, and no event is ever
//! published for a transition that was rejected.
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for testing clients without spawning actors.

pub mod clients;
pub mod config;
pub mod execution;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod server;
pub mod service;
