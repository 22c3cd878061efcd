//! Shared read operations for domain clients.
//!
//! A domain client wraps a [`ResourceClient`] and converts [`FrameworkError`] into its own
//! error type. Implementing [`ActorClient`] gives it `get` and `list` with that
//! conversion already applied, so only the write paths need hand-written methods.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Read operations every domain client gets for free.
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Ticket { id: u64, seat: u32 }
/// #[derive(Debug)] struct Reserve(u32);
/// #[derive(Debug)] struct Move(u32);
/// #[derive(Debug, thiserror::Error)] #[error("ticket: {0}")] struct TicketError(String);
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u64; type Create = Reserve; type Update = Move;
///     type Context = (); type Error = TicketError;
///     fn from_create_params(id: u64, params: Reserve) -> Result<Self, Self::Error> {
///         Ok(Self { id, seat: params.0 })
///     }
///     async fn on_update(&mut self, update: Move, _: &()) -> Result<(), Self::Error> {
///         self.seat = update.0;
///         Ok(())
///     }
/// }
///
/// struct TicketClient(ResourceClient<Ticket>);
///
/// #[async_trait]
/// impl ActorClient<Ticket> for TicketClient {
///     type Error = TicketError;
///     fn inner(&self) -> &ResourceClient<Ticket> { &self.0 }
///     fn map_error(e: FrameworkError) -> TicketError { TicketError(e.to_string()) }
/// }
///
/// async fn seats(client: &TicketClient) -> Result<Vec<u32>, TicketError> {
///     Ok(client.list().await?.into_iter().map(|t| t.seat).collect())
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Converts a transport or store failure into the client's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// `Ok(None)` when the actor holds no entity with this id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending get");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Snapshot of every stored entity, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending list");
        self.inner().list().await.map_err(Self::map_error)
    }
}
