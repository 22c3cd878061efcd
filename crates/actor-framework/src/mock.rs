//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are
//! answered from a queue of expectations instead of a running actor. It lets you test
//! logic built *around* a client (retry rules, error mapping, background tasks) fast and
//! deterministically, and makes failures that are hard to provoke with a real actor
//! (a closed actor, a dropped reply) trivial to inject.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Job { id: u32, done: bool }
//! #[derive(Debug)] struct JobCreate;
//! #[derive(Debug)] struct MarkDone;
//! #[derive(Debug, thiserror::Error)] #[error("job error")] struct JobError;
//!
//! #[async_trait]
//! impl ActorEntity for Job {
//!     type Id = u32; type Create = JobCreate; type Update = MarkDone;
//!     type Context = (); type Error = JobError;
//!     fn from_create_params(id: u32, _: JobCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, done: false })
//!     }
//!     async fn on_update(&mut self, _: MarkDone, _: &()) -> Result<(), Self::Error> {
//!         self.done = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Job>::new();
//!     mock.expect_update(1).return_ok(Job { id: 1, done: true });
//!     mock.expect_update(2).return_err(FrameworkError::NotFound("2".into()));
//!
//!     let client = mock.client();
//!     assert!(client.update(1, MarkDone).await.unwrap().done);
//!     assert!(matches!(client.update(2, MarkDone).await, Err(FrameworkError::NotFound(_))));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request together with the canned response.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (wrong operation or wrong id) is answered by dropping its reply
/// channel, so the caller sees [`FrameworkError::ActorDropped`], and the mismatch is
/// reported by [`MockClient::verify`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let failures = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        lock(&failures).push(describe(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join(", "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back((self.make)(Err(error)));
    }
}

fn lock<V>(mutex: &Mutex<V>) -> std::sync::MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "create".to_string(),
        ResourceRequest::Get { id, .. } => format!("get({})", id),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, .. } => format!("update({})", id),
        ResourceRequest::Delete { id, .. } => format!("delete({})", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Lamp {
        id: u32,
        on: bool,
    }

    #[derive(Debug)]
    struct LampCreate;

    #[derive(Debug)]
    struct Toggle;

    #[derive(Debug, thiserror::Error)]
    #[error("Lamp error")]
    struct LampError;

    #[async_trait]
    impl ActorEntity for Lamp {
        type Id = u32;
        type Create = LampCreate;
        type Update = Toggle;
        type Context = ();
        type Error = LampError;

        fn from_create_params(id: u32, _params: LampCreate) -> Result<Self, Self::Error> {
            Ok(Self { id, on: false })
        }

        async fn on_update(&mut self, _update: Toggle, _ctx: &()) -> Result<(), Self::Error> {
            self.on = !self.on;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Lamp>::new();
        mock.expect_get(1).return_ok(Some(Lamp { id: 1, on: false }));
        mock.expect_update(1).return_ok(Lamp { id: 1, on: true });
        mock.expect_list().return_ok(vec![Lamp { id: 1, on: true }]);
        mock.expect_delete(1).return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        assert_eq!(client.get(1).await.unwrap(), Some(Lamp { id: 1, on: false }));
        assert!(client.update(1, Toggle).await.unwrap().on);
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert!(matches!(client.delete(1).await, Err(FrameworkError::ActorClosed)));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests: update(2)")]
    async fn test_mismatched_request_is_reported() {
        let mut mock = MockClient::<Lamp>::new();
        mock.expect_update(1).return_ok(Lamp { id: 1, on: true });

        let result = mock.client().update(2, Toggle).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }
}
