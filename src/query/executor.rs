use super::catalog::QueryCatalog;
use super::execute::{execute, QueryParams, QueryResult};
use crate::error::ContentError;
use crate::store::ContentStore;
use std::fmt;
use std::sync::Arc;

/// A definition name plus its bound parameters: the identity of one cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub query: String,
    pub params: QueryParams,
}

impl QueryKey {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: QueryParams::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)?;
        if !self.params.is_empty() {
            let params: Vec<_> = self.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, "{{{}}}", params.join(","))?;
        }
        Ok(())
    }
}

/// Runs catalog queries by key against one store.
pub struct QueryExecutor {
    store: Arc<dyn ContentStore>,
    catalog: QueryCatalog,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn ContentStore>, catalog: QueryCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub async fn run(&self, key: &QueryKey) -> Result<QueryResult, ContentError> {
        let definition = self.catalog.get(&key.query)?;
        execute(definition, &key.params, self.store.as_ref()).await
    }
}
