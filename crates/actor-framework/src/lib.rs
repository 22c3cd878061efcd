//! # Actor Framework
//!
//! This crate provides the building blocks for type-safe, concurrent actor systems in
//! Rust: a generic resource actor with CRUD semantics, and a fan-out broadcaster that
//! pushes events to a live set of subscribers.
//!
//! ## Why Actors?
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor eliminates race conditions
//!
//! Every operation on a resource, including the side effects its hooks perform, runs to
//! completion before the next request is handled. Two actors still run in parallel.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your business logic and domain models
//! 2. **Runtime Layer** ([`ResourceActor`], [`BroadcastActor`]) - Message processing and state
//! 3. **Interface Layer** ([`ResourceClient`], [`Broadcaster`], [`ActorClient`]) - Type-safe communication
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction
//! time. A resource whose hooks must notify observers receives a [`Broadcaster`] as
//! its context:
//!
//! ```rust
//! use actor_framework::{ActorEntity, BroadcastActor, Broadcaster, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Door { id: u32, open: bool }
//! #[derive(Debug)] struct DoorCreate;
//! #[derive(Debug)] struct Open;
//! #[derive(Debug, thiserror::Error)] #[error("door error")] struct DoorError;
//!
//! #[async_trait]
//! impl ActorEntity for Door {
//!     type Id = u32;
//!     type Create = DoorCreate;
//!     type Update = Open;
//!     type Context = Broadcaster<String>;
//!     type Error = DoorError;
//!
//!     fn from_create_params(id: u32, _: DoorCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, open: false })
//!     }
//!
//!     async fn on_update(&mut self, _: Open, events: &Broadcaster<String>) -> Result<(), Self::Error> {
//!         self.open = true;
//!         let _ = events.publish(format!("door {} opened", self.id)).await;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (broadcast_actor, events) = BroadcastActor::new(16, 16);
//!     tokio::spawn(broadcast_actor.run());
//!     let mut watcher = events.connect().await.unwrap();
//!
//!     let mut next = 0;
//!     let (door_actor, doors) = ResourceActor::<Door>::new(16, move || { next += 1; next });
//!     tokio::spawn(door_actor.run(events.clone()));
//!
//!     let door = doors.create(DoorCreate).await.unwrap();
//!     doors.update(door.id, Open).await.unwrap();
//!     assert_eq!(watcher.recv().await.as_deref(), Some("door 1 opened"));
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from a queue of expectations,
//! so client-side logic can be tested without spawning any actors.

pub mod actor;
pub mod broadcast;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use broadcast::{BroadcastActor, Broadcaster, DeliveryError, PublishReport, SubscriberId, Subscription};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
