//! # Fan-out Broadcaster
//!
//! A registry of live subscribers that pushes every published event to all of them.
//!
//! The registry is itself an actor: [`BroadcastActor`] owns the subscriber map and
//! handles `Connect`, `Disconnect`, `Publish`, `Count` and `Close` requests one at a
//! time, so a publish never races with a connect or a disconnect. [`Broadcaster`] is
//! the cloneable client half.
//!
//! ## Delivery
//!
//! Every subscriber gets its own bounded channel. Publishing uses `try_send`, which
//! never waits: a subscriber whose channel is closed (the session went away) or full
//! (the session stopped reading) fails with a [`DeliveryError`]. The failure is logged,
//! counted in the [`PublishReport`] and the subscriber is deregistered on the spot.
//! Dropping its sender closes the subscriber's [`Subscription`], which is how the
//! owning session learns that it was cut off. Failures are never returned to the
//! publisher.
//!
//! ```rust
//! use actor_framework::broadcast::BroadcastActor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, broadcaster) = BroadcastActor::<String>::new(16, 8);
//!     tokio::spawn(actor.run());
//!
//!     let mut subscription = broadcaster.connect().await.unwrap();
//!     let report = broadcaster.publish("hello".to_string()).await.unwrap();
//!     assert_eq!(report.delivered, 1);
//!     assert_eq!(subscription.recv().await.as_deref(), Some("hello"));
//! }
//! ```

use crate::error::FrameworkError;
use crate::message::Response;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Identity of one subscriber session. Never reused within a broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber_{}", self.0)
    }
}

/// Why a single delivery attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("{0} disconnected")]
    Closed(SubscriberId),
    #[error("{0} is not keeping up")]
    Lagging(SubscriberId),
}

/// Outcome of one publish across the whole registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that accepted the event.
    pub delivered: usize,
    /// Subscribers that failed and were deregistered.
    pub dropped: usize,
}

/// The receiving end handed to a subscriber on connect.
#[derive(Debug)]
pub struct Subscription<E> {
    id: SubscriberId,
    events: mpsc::Receiver<E>,
}

impl<E> Subscription<E> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the registry has dropped this subscriber (failed delivery,
    /// explicit disconnect, or broadcaster shutdown) and every buffered event was read.
    pub async fn recv(&mut self) -> Option<E> {
        self.events.recv().await
    }
}

enum BroadcastRequest<E> {
    Connect {
        respond_to: Response<Subscription<E>>,
    },
    Disconnect {
        id: SubscriberId,
        respond_to: Response<bool>,
    },
    Publish {
        event: E,
        respond_to: Response<PublishReport>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Close {
        respond_to: Response<usize>,
    },
}

/// The actor owning the subscriber registry.
pub struct BroadcastActor<E> {
    receiver: mpsc::Receiver<BroadcastRequest<E>>,
    subscribers: HashMap<SubscriberId, mpsc::Sender<E>>,
    next_id: u64,
    subscriber_buffer: usize,
}

impl<E: Clone + Send + Debug + 'static> BroadcastActor<E> {
    /// Creates the registry actor and its client.
    ///
    /// * `buffer_size` - capacity of the request channel.
    /// * `subscriber_buffer` - how many undelivered events one subscriber may hold
    ///   before it is considered lagging and dropped.
    pub fn new(buffer_size: usize, subscriber_buffer: usize) -> (Self, Broadcaster<E>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            subscribers: HashMap::new(),
            next_id: 1,
            subscriber_buffer: subscriber_buffer.max(1),
        };
        (actor, Broadcaster { sender })
    }

    /// Runs the registry until every [`Broadcaster`] is dropped or `close` is called.
    pub async fn run(mut self) {
        info!("Broadcaster started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BroadcastRequest::Connect { respond_to } => {
                    let id = SubscriberId(self.next_id);
                    self.next_id += 1;
                    let (sender, events) = mpsc::channel(self.subscriber_buffer);
                    self.subscribers.insert(id, sender);
                    info!(%id, subscribers = self.subscribers.len(), "Subscriber connected");
                    let _ = respond_to.send(Ok(Subscription { id, events }));
                }
                BroadcastRequest::Disconnect { id, respond_to } => {
                    let removed = self.subscribers.remove(&id).is_some();
                    if removed {
                        info!(%id, subscribers = self.subscribers.len(), "Subscriber disconnected");
                    } else {
                        debug!(%id, "Subscriber already gone");
                    }
                    let _ = respond_to.send(Ok(removed));
                }
                BroadcastRequest::Publish { event, respond_to } => {
                    debug!(?event, subscribers = self.subscribers.len(), "Publish");
                    let report = self.deliver(&event);
                    let _ = respond_to.send(Ok(report));
                }
                BroadcastRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.subscribers.len()));
                }
                BroadcastRequest::Close { respond_to } => {
                    self.receiver.close();
                    let released = self.subscribers.len();
                    self.subscribers.clear();
                    let _ = respond_to.send(Ok(released));
                    break;
                }
            }
        }

        info!(subscribers = self.subscribers.len(), "Broadcaster shutdown");
    }

    /// Attempts delivery to every registered subscriber, dropping the ones that fail.
    fn deliver(&mut self, event: &E) -> PublishReport {
        let mut report = PublishReport::default();
        self.subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(err) => {
                let failure = match err {
                    TrySendError::Closed(_) => DeliveryError::Closed(*id),
                    TrySendError::Full(_) => DeliveryError::Lagging(*id),
                };
                warn!(error = %failure, "Delivery failed, dropping subscriber");
                report.dropped += 1;
                false
            }
        });
        report
    }
}

/// Cloneable handle to a [`BroadcastActor`].
pub struct Broadcaster<E> {
    sender: mpsc::Sender<BroadcastRequest<E>>,
}

impl<E> Clone for Broadcaster<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> Debug for Broadcaster<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<E: Send + 'static> Broadcaster<E> {
    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> BroadcastRequest<E>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Registers a new subscriber. It receives every event published after this returns.
    pub async fn connect(&self) -> Result<Subscription<E>, FrameworkError> {
        self.request(|respond_to| BroadcastRequest::Connect { respond_to })
            .await
    }

    /// Deregisters a subscriber. Returns `false` if it was already gone.
    pub async fn disconnect(&self, id: SubscriberId) -> Result<bool, FrameworkError> {
        self.request(|respond_to| BroadcastRequest::Disconnect { id, respond_to })
            .await
    }

    /// Fans the event out to every registered subscriber.
    ///
    /// An `Err` here means the registry itself is gone; per-subscriber failures are
    /// only visible through the returned report.
    pub async fn publish(&self, event: E) -> Result<PublishReport, FrameworkError> {
        self.request(|respond_to| BroadcastRequest::Publish { event, respond_to })
            .await
    }

    pub async fn subscriber_count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| BroadcastRequest::Count { respond_to })
            .await
    }

    /// Drops every subscriber and stops the actor. Returns how many were released.
    pub async fn close(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| BroadcastRequest::Close { respond_to })
            .await
    }
}
