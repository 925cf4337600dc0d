use crate::error::ContentError;
use crate::query::{QueryExecutor, QueryKey, QueryResult};
use async_trait::async_trait;
use query_framework::QueryResource;
use std::sync::Arc;

/// Site content as a cached resource: keyed by query name and parameters, fetched through
/// the [`QueryExecutor`] injected as context.
pub struct ContentResource;

#[async_trait]
impl QueryResource for ContentResource {
    type Key = QueryKey;
    type Data = QueryResult;
    type Error = ContentError;
    type Context = Arc<QueryExecutor>;

    async fn fetch(
        key: &QueryKey,
        executor: &Arc<QueryExecutor>,
    ) -> Result<QueryResult, ContentError> {
        executor.run(key).await
    }

    /// Only store outages are worth another attempt.
    fn is_retryable(error: &ContentError) -> bool {
        error.is_transient()
    }
}
