//! # QueryResource Trait
//!
//! The `QueryResource` trait is the contract every cached data source implements to be served
//! by the generic [`QueryActor`](crate::QueryActor). It names the key type, the data type, the
//! error type, and the context injected at runtime, and provides the one async operation the
//! cache needs: `fetch`.
//!
//! Associated types keep the cache type-safe: a `QueryClient<Insights>` only accepts insight
//! keys and only yields insight data.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any cached data source must implement to be managed by `QueryActor`.
///
/// # Async & Context
/// `fetch` is an associated function: the resource is a type-level description, and all the
/// state it needs lives in `Context` (a store handle, an HTTP client). The context is cloned
/// into each fetch task, so it should be cheap to clone (an `Arc` or a handle).
#[async_trait]
pub trait QueryResource: Send + Sync + 'static {
    /// Cache key; one entry and at most one in-flight request per distinct key.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// The settled value shared by every observer of a key.
    type Data: Clone + Send + Sync + Debug + 'static;

    /// The error produced by a single failed attempt.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Clone + Send + Sync + 'static;

    /// Perform one attempt to load the data for `key`.
    async fn fetch(key: &Self::Key, ctx: &Self::Context) -> Result<Self::Data, Self::Error>;

    /// Whether a failed attempt may be retried. Defaults to retrying everything.
    fn is_retryable(_error: &Self::Error) -> bool {
        true
    }
}
