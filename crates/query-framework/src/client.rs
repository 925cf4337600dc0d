//! # Generic Client
//!
//! This module defines the generic client for communicating with the cache actor and the
//! observer handle it hands out.

use crate::error::QueryError;
use crate::message::{CacheEvent, CacheStats, QueryRequest};
use crate::policy::QueryPolicy;
use crate::resource::QueryResource;
use crate::state::QueryState;
use std::fmt;
use tokio::sync::{mpsc, oneshot, watch};

/// ## QueryClient
///
/// A type-safe, async handle to a `QueryActor<T>`. It forwards requests over a Tokio mpsc
/// channel and receives results via oneshot channels.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Async API** – every method resolves to `Result<…, QueryError>`.
pub struct QueryClient<T: QueryResource> {
    sender: mpsc::Sender<QueryRequest<T>>,
}

impl<T: QueryResource> Clone for QueryClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: QueryResource> QueryClient<T> {
    pub fn new(sender: mpsc::Sender<QueryRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, QueryError>>) -> QueryRequest<T>,
    ) -> Result<R, QueryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| QueryError::ActorClosed)?;
        response.await.map_err(|_| QueryError::ActorDropped)?
    }

    /// Resolve the data for `key`, sharing any request already in flight.
    pub async fn fetch(&self, key: T::Key, policy: QueryPolicy) -> Result<T::Data, QueryError> {
        self.request(|respond_to| QueryRequest::Fetch {
            key,
            policy,
            respond_to,
        })
        .await
    }

    /// Attach an observer to `key`. The entry is retained while the observer lives.
    pub async fn observe(
        &self,
        key: T::Key,
        policy: QueryPolicy,
    ) -> Result<QueryObserver<T>, QueryError> {
        self.request(|respond_to| QueryRequest::Observe {
            key,
            policy,
            respond_to,
        })
        .await
    }

    /// Mark `key` stale. Returns whether an entry existed.
    pub async fn invalidate(&self, key: T::Key) -> Result<bool, QueryError> {
        self.request(|respond_to| QueryRequest::Invalidate { key, respond_to })
            .await
    }

    /// Signal that the application regained foreground focus. Returns the number of refetches
    /// started.
    pub async fn focus_regained(&self) -> Result<usize, QueryError> {
        self.request(|respond_to| QueryRequest::FocusRegained { respond_to })
            .await
    }

    pub async fn snapshot(&self, key: T::Key) -> Result<Option<QueryState<T::Data>>, QueryError> {
        self.request(|respond_to| QueryRequest::Snapshot { key, respond_to })
            .await
    }

    pub async fn stats(&self) -> Result<CacheStats, QueryError> {
        self.request(|respond_to| QueryRequest::Stats { respond_to })
            .await
    }
}

/// A live view of one cache entry.
///
/// Dropping the observer detaches it; once an entry has no observers its retention window
/// starts. A fetch already in flight is not aborted, other observers still receive it.
pub struct QueryObserver<T: QueryResource> {
    key: T::Key,
    receiver: watch::Receiver<QueryState<T::Data>>,
    detach: Option<mpsc::UnboundedSender<CacheEvent<T>>>,
}

impl<T: QueryResource> QueryObserver<T> {
    pub(crate) fn attached(
        key: T::Key,
        receiver: watch::Receiver<QueryState<T::Data>>,
        detach: mpsc::UnboundedSender<CacheEvent<T>>,
    ) -> Self {
        Self {
            key,
            receiver,
            detach: Some(detach),
        }
    }

    /// An observer not tied to any actor, for mocks and tests.
    pub fn detached(key: T::Key, receiver: watch::Receiver<QueryState<T::Data>>) -> Self {
        Self {
            key,
            receiver,
            detach: None,
        }
    }

    pub fn key(&self) -> &T::Key {
        &self.key
    }

    /// Current state of the entry.
    pub fn state(&self) -> QueryState<T::Data> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next state change.
    pub async fn changed(&mut self) -> Result<QueryState<T::Data>, QueryError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| QueryError::ActorDropped)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Wait until the entry holds data or an error.
    pub async fn settled(&mut self) -> Result<T::Data, QueryError> {
        loop {
            let current = match &*self.receiver.borrow_and_update() {
                QueryState::Success(data) => Some(Ok(data.clone())),
                QueryState::Error(error) => Some(Err(error.clone())),
                QueryState::Pending | QueryState::Retrying { .. } => None,
            };
            if let Some(result) = current {
                return result;
            }
            self.receiver
                .changed()
                .await
                .map_err(|_| QueryError::ActorDropped)?;
        }
    }
}

impl<T: QueryResource> fmt::Debug for QueryObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryObserver")
            .field("key", &self.key)
            .field("state", &*self.receiver.borrow())
            .finish()
    }
}

impl<T: QueryResource> Drop for QueryObserver<T> {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            let _ = detach.send(CacheEvent::Detach {
                key: self.key.clone(),
            });
        }
    }
}
