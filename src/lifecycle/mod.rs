//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops the actors behind the service.
//!
//! ## Wiring
//!
//! ```text
//!   BroadcastActor<OrderEvent> <─── publish ─── ResourceActor<Order>
//!          │                                        ▲
//!          │ connect/recv                           │ create/get/list/update/delete
//!          ▼                                        │
//!    WebSocket sessions                   OrderClient ◄── ExecutionScheduler
//!                                                   ▲
//!                                             OrderService ◄── HTTP handlers
//! ```
//!
//! The broadcaster starts first because the order actor receives it as its context
//! at `run(context)`. No actor holds a client of another actor that holds it back, so
//! the dependency graph stays acyclic and shutdown can rely on channel closure.
//!
//! ## Graceful Shutdown
//!
//! 1. **Abort lifecycle tasks** - nothing executes after shutdown begins
//! 2. **Drop the service** - the order actor's channel closes and its loop ends
//! 3. **Close the broadcaster** - every subscription ends, so WebSocket sessions finish
//! 4. **Await completion** - both actor tasks are joined
//!
//! Step 2 only completes once every other `OrderService` clone is gone, so the HTTP
//! server must have stopped before [`OrderSystem::shutdown`] is called.

pub mod order_system;
pub mod tracing;

pub use self::order_system::*;
pub use self::tracing::setup_tracing;
