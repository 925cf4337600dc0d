//! # Content Hook
//!
//! One content area's view of the shared cache: a fixed key and policy on top of the
//! generic [`QueryClient<ContentResource>`].
use super::resource::ContentResource;
use crate::error::ContentError;
use crate::query::{QueryKey, QueryResult};
use async_trait::async_trait;
use query_framework::{QueryClient, QueryError, QueryHook, QueryPolicy};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HookError {
    #[error("{error} (after {attempts} attempt(s))")]
    Content { attempts: u32, error: ContentError },

    #[error("Content cache error: {0}")]
    Cache(QueryError),
}

impl HookError {
    /// The content error behind this failure, if the store or executor produced one.
    pub fn content(&self) -> Option<&ContentError> {
        match self {
            HookError::Content { error, .. } => Some(error),
            HookError::Cache(_) => None,
        }
    }
}

impl From<QueryError> for HookError {
    fn from(e: QueryError) -> Self {
        match (e.attempts(), e.downcast_ref::<ContentError>()) {
            (Some(attempts), Some(error)) => HookError::Content {
                attempts,
                error: error.clone(),
            },
            _ => HookError::Cache(e),
        }
    }
}

/// Client for one content area.
#[derive(Clone)]
pub struct ContentHook {
    inner: QueryClient<ContentResource>,
    key: QueryKey,
    policy: QueryPolicy,
}

impl ContentHook {
    pub fn new(inner: QueryClient<ContentResource>, key: QueryKey, policy: QueryPolicy) -> Self {
        Self { inner, key, policy }
    }

    pub fn key_ref(&self) -> &QueryKey {
        &self.key
    }

    pub fn policy_ref(&self) -> &QueryPolicy {
        &self.policy
    }

    /// The cached state without attaching an observer or triggering a fetch.
    pub async fn peek(&self) -> Result<Option<QueryResult>, HookError> {
        let state = self.inner.snapshot(self.key.clone()).await?;
        Ok(state.and_then(|s| s.data().cloned()))
    }
}

#[async_trait]
impl QueryHook<ContentResource> for ContentHook {
    type Error = HookError;

    fn inner(&self) -> &QueryClient<ContentResource> {
        &self.inner
    }

    fn key(&self) -> QueryKey {
        self.key.clone()
    }

    fn policy(&self) -> QueryPolicy {
        self.policy.clone()
    }

    fn map_error(e: QueryError) -> HookError {
        HookError::from(e)
    }
}
