//! # QueryHook Trait
//!
//! Provides a common interface for content-area hooks: each hook pins one key and one policy
//! on top of a generic [`QueryClient`], and gets `fetch`, `observe` and `invalidate` for free.
use crate::{QueryClient, QueryError, QueryObserver, QueryPolicy, QueryResource};
use async_trait::async_trait;

/// Trait for resource-specific hooks to inherit the standard cache operations.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use query_framework::{QueryClient, QueryError, QueryHook, QueryPolicy, QueryResource};
///
/// struct Headline;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("headline unavailable")]
/// struct HeadlineError;
///
/// #[async_trait]
/// impl QueryResource for Headline {
///     type Key = &'static str;
///     type Data = String;
///     type Error = HeadlineError;
///     type Context = ();
///     async fn fetch(key: &&'static str, _: &()) -> Result<String, HeadlineError> {
///         Ok(key.to_uppercase())
///     }
/// }
///
/// struct HeadlineHook {
///     inner: QueryClient<Headline>,
/// }
///
/// #[async_trait]
/// impl QueryHook<Headline> for HeadlineHook {
///     type Error = String;
///
///     fn inner(&self) -> &QueryClient<Headline> {
///         &self.inner
///     }
///     fn key(&self) -> &'static str {
///         "home"
///     }
///     fn policy(&self) -> QueryPolicy {
///         QueryPolicy::default()
///     }
///     fn map_error(e: QueryError) -> String {
///         e.to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait QueryHook<T: QueryResource>: Send + Sync {
    /// The hook-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic QueryClient.
    fn inner(&self) -> &QueryClient<T>;

    /// The cache key this hook reads.
    fn key(&self) -> T::Key;

    /// The caching/retry policy of this content area.
    fn policy(&self) -> QueryPolicy;

    /// Map framework errors to the hook's error type.
    fn map_error(e: QueryError) -> Self::Error;

    /// Resolve the data once.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self) -> Result<T::Data, Self::Error> {
        let key = self.key();
        tracing::debug!(%key, "Sending fetch");
        self.inner()
            .fetch(key, self.policy())
            .await
            .map_err(Self::map_error)
    }

    /// Attach a live observer.
    #[tracing::instrument(skip(self))]
    async fn observe(&self) -> Result<QueryObserver<T>, Self::Error> {
        let key = self.key();
        tracing::debug!(%key, "Sending observe");
        self.inner()
            .observe(key, self.policy())
            .await
            .map_err(Self::map_error)
    }

    /// Mark this hook's entry stale.
    #[tracing::instrument(skip(self))]
    async fn invalidate(&self) -> Result<bool, Self::Error> {
        self.inner()
            .invalidate(self.key())
            .await
            .map_err(Self::map_error)
    }
}
