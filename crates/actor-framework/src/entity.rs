//! The contract between a stored type and the [`ResourceActor`](crate::ResourceActor)
//! that owns it.
//!
//! Hooks run inside the actor's loop with the injected context. Anything a hook does,
//! whether mutating the entity or publishing through a [`Broadcaster`](crate::Broadcaster),
//! completes before the actor looks at its next request. Side effects that must stay in
//! step with the stored state belong in a hook.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Key under which the actor stores the entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload of a create request.
    type Create: Send + Sync + Debug;

    /// Payload of an update request.
    type Update: Send + Sync + Debug;

    /// Dependencies handed to `ResourceActor::run` and passed to every hook.
    /// `()` when there are none.
    type Context: Send + Sync;

    /// Boxed into [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the
    /// way out; [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error)
    /// recovers it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity under the id the actor just allocated.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs before the entity is stored. An error discards it.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update to the stored entity.
    ///
    /// The actor keeps whatever this leaves behind, error or not, so validate first.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. An error keeps the entity stored; on success the caller
    /// receives the entity as this hook left it.
    async fn on_delete(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
