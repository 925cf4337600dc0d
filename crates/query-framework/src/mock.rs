//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`QueryClient<T>`] whose requests are answered from scripted
//! expectations instead of a running [`QueryActor`](crate::QueryActor). It lets you unit test
//! hook wrappers deterministically, including failure paths that are awkward to provoke with a
//! real content store.
//!
//! ## When to use Mocks vs the Real Actor
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (spawns fetch tasks) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler and timers |
//! | **State** | No cache (expectations) | Real staleness, retention, retries |
//! | **Use Case** | Logic *around* the client | Cache behaviour itself |
//! | **Error Injection** | Easy (`return_err`) | Needs a failing resource |
//!
//! ```rust
//! use async_trait::async_trait;
//! use query_framework::mock::MockClient;
//! use query_framework::{QueryError, QueryPolicy, QueryResource};
//!
//! struct Figures;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("figures unavailable")]
//! struct FiguresError;
//!
//! #[async_trait]
//! impl QueryResource for Figures {
//!     type Key = u32;
//!     type Data = Vec<u64>;
//!     type Error = FiguresError;
//!     type Context = ();
//!     async fn fetch(_: &u32, _: &()) -> Result<Vec<u64>, FiguresError> {
//!         Ok(vec![])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Figures>::new();
//!     mock.expect_fetch(1).return_ok(vec![10, 20]);
//!     mock.expect_fetch(2).return_err(QueryError::Timeout(std::time::Duration::from_secs(1)));
//!
//!     let client = mock.client();
//!     assert_eq!(client.fetch(1, QueryPolicy::default()).await.unwrap(), vec![10, 20]);
//!     assert!(matches!(
//!         client.fetch(2, QueryPolicy::default()).await,
//!         Err(QueryError::Timeout(_))
//!     ));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw request receiver, then the
//! `expect_*` helpers to assert what was sent and answer it by hand.

use crate::client::{QueryClient, QueryObserver};
use crate::error::QueryError;
use crate::message::QueryRequest;
use crate::policy::QueryPolicy;
use crate::resource::QueryResource;
use crate::state::QueryState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: QueryResource> {
    Fetch {
        key: T::Key,
        response: Result<T::Data, QueryError>,
    },
    Observe {
        key: T::Key,
        state: QueryState<T::Data>,
    },
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: QueryResource> {
    client: QueryClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: QueryResource> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: QueryResource> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<QueryRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        QueryRequest::Fetch {
                            key, respond_to, ..
                        },
                        Some(Expectation::Fetch {
                            key: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(key, expected, "fetch for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (
                        QueryRequest::Observe {
                            key, respond_to, ..
                        },
                        Some(Expectation::Observe {
                            key: expected,
                            state,
                        }),
                    ) => {
                        assert_eq!(key, expected, "observe for unexpected key");
                        let (_sender, receiver) = watch::channel(state);
                        let _ = respond_to.send(Ok(QueryObserver::detached(key, receiver)));
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: QueryClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> QueryClient<T> {
        self.client.clone()
    }

    /// Expects a `fetch` for `key`.
    pub fn expect_fetch(&mut self, key: T::Key) -> FetchExpectationBuilder<T> {
        FetchExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `observe` for `key`; the observer is handed `state`.
    pub fn expect_observe(&mut self, key: T::Key, state: QueryState<T::Data>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(Expectation::Observe { key, state });
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder<T: QueryResource> {
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: QueryResource> FetchExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, data: T::Data) {
        self.push(Ok(data));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: QueryError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Data, QueryError>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(Expectation::Fetch {
                key: self.key,
                response,
            });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: QueryResource>(
    buffer_size: usize,
) -> (QueryClient<T>, mpsc::Receiver<QueryRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (QueryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Fetch request
pub async fn expect_fetch<T: QueryResource>(
    receiver: &mut mpsc::Receiver<QueryRequest<T>>,
) -> Option<(
    T::Key,
    QueryPolicy,
    oneshot::Sender<Result<T::Data, QueryError>>,
)> {
    match receiver.recv().await {
        Some(QueryRequest::Fetch {
            key,
            policy,
            respond_to,
        }) => Some((key, policy, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Observe request
pub async fn expect_observe<T: QueryResource>(
    receiver: &mut mpsc::Receiver<QueryRequest<T>>,
) -> Option<(
    T::Key,
    QueryPolicy,
    oneshot::Sender<Result<QueryObserver<T>, QueryError>>,
)> {
    match receiver.recv().await {
        Some(QueryRequest::Observe {
            key,
            policy,
            respond_to,
        }) => Some((key, policy, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Insight;

    #[derive(Debug, thiserror::Error)]
    #[error("insight error")]
    struct InsightError;

    #[async_trait]
    impl QueryResource for Insight {
        type Key = String;
        type Data = String;
        type Error = InsightError;
        type Context = ();

        async fn fetch(_key: &String, _ctx: &()) -> Result<String, InsightError> {
            Err(InsightError)
        }
    }

    #[tokio::test]
    async fn test_mock_client_raw_channel() {
        let (client, mut receiver) = create_mock_client::<Insight>(10);

        let task = tokio::spawn(async move {
            client
                .fetch("insights".to_string(), QueryPolicy::default())
                .await
        });

        let (key, policy, responder) = expect_fetch(&mut receiver)
            .await
            .expect("Expected Fetch request");
        assert_eq!(key, "insights");
        assert_eq!(policy.retry, 3);
        responder.send(Ok("q3 outlook".to_string())).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), "q3 outlook");
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Insight>::new();
        mock.expect_fetch("a".to_string())
            .return_ok("first".to_string());
        mock.expect_observe("b".to_string(), QueryState::Success("second".to_string()));

        let client = mock.client();
        let data = client
            .fetch("a".to_string(), QueryPolicy::default())
            .await
            .unwrap();
        assert_eq!(data, "first");

        let mut observer = client
            .observe("b".to_string(), QueryPolicy::default())
            .await
            .unwrap();
        assert_eq!(observer.settled().await.unwrap(), "second");

        mock.verify();
    }
}
