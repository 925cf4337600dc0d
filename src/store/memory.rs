use super::{Asset, ContentStore, Document};
use crate::error::ContentError;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// An in-process content store.
///
/// Natural order is insertion order: `documents` returns instances of a type in the order
/// they were first inserted, and replacing a document keeps its position. Singleton
/// queries therefore pick the earliest inserted match.
///
/// The store can be scripted to fail (`fail_next`, `set_offline`) and to answer slowly
/// (`with_latency`), and counts the type listings it served.
pub struct InMemoryStore {
    documents: RwLock<Vec<Document>>,
    assets: RwLock<HashMap<String, Asset>>,
    latency: Duration,
    listings: AtomicUsize,
    failures_left: AtomicU32,
    offline: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            assets: RwLock::new(HashMap::new()),
            latency: Duration::ZERO,
            listings: AtomicUsize::new(0),
            failures_left: AtomicU32::new(0),
            offline: AtomicBool::new(false),
        }
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Inserts a document, replacing any document with the same `_id` in place.
    ///
    /// Values that are not objects, or lack `_id`/`_type`, are skipped.
    pub fn insert(&self, document: Value) {
        let Value::Object(document) = document else {
            warn!("Skipping non-object document");
            return;
        };
        let (Some(id), Some(_)) = (id_of(&document), document.get("_type")) else {
            warn!("Skipping document without _id or _type");
            return;
        };
        let id = id.to_string();

        let mut documents = self.documents.write();
        match documents.iter_mut().find(|d| id_of(d) == Some(id.as_str())) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    /// Merges the fields of `patch` into the document with `id`. Returns false if absent.
    pub fn patch(&self, id: &str, patch: Value) -> bool {
        let mut documents = self.documents.write();
        let Some(document) = documents.iter_mut().find(|d| id_of(d) == Some(id)) else {
            return false;
        };
        if let Value::Object(fields) = patch {
            document.extend(fields);
        }
        true
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut documents = self.documents.write();
        let before = documents.len();
        documents.retain(|d| id_of(d) != Some(id));
        documents.len() != before
    }

    pub fn add_asset(&self, asset: Asset) {
        self.assets.write().insert(asset.id.clone(), asset);
    }

    /// Fails the next `count` calls with [`ContentError::StoreUnavailable`].
    pub fn fail_next(&self, count: u32) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    /// Fails every call until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `documents` listings served or failed so far.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    async fn answer(&self) -> Result<(), ContentError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(ContentError::StoreUnavailable("store is offline".into()));
        }
        let scripted = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if scripted {
            return Err(ContentError::StoreUnavailable("connection reset".into()));
        }
        Ok(())
    }
}

fn id_of(document: &Document) -> Option<&str> {
    document.get("_id").and_then(Value::as_str)
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn documents(&self, type_name: &str) -> Result<Vec<Document>, ContentError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.answer().await?;
        let documents: Vec<Document> = self
            .documents
            .read()
            .iter()
            .filter(|d| d.get("_type").and_then(Value::as_str) == Some(type_name))
            .cloned()
            .collect();
        debug!(type_name, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    async fn document(&self, id: &str) -> Result<Option<Document>, ContentError> {
        self.answer().await?;
        Ok(self
            .documents
            .read()
            .iter()
            .find(|d| id_of(d) == Some(id))
            .cloned())
    }

    async fn asset(&self, asset_id: &str) -> Result<Option<Asset>, ContentError> {
        self.answer().await?;
        Ok(self.assets.read().get(asset_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn listing_keeps_insertion_order_across_replacement() {
        let store = InMemoryStore::new();
        store.insert(json!({ "_id": "a", "_type": "teamMember", "name": "Ada" }));
        store.insert(json!({ "_id": "b", "_type": "teamMember", "name": "Ben" }));
        store.insert(json!({ "_id": "c", "_type": "statistics" }));
        store.insert(json!({ "_id": "a", "_type": "teamMember", "name": "Ada L." }));
        store.insert(json!("not a document"));

        let members = store.documents("teamMember").await.unwrap();
        let names: Vec<_> = members.iter().map(|d| d["name"].clone()).collect();
        assert_eq!(names, vec![json!("Ada L."), json!("Ben")]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.listings(), 1);
    }

    #[tokio::test]
    async fn scripted_failures_run_out() {
        let store = InMemoryStore::new();
        store.fail_next(2);

        assert!(store.documents("legalPage").await.is_err());
        assert!(store.asset("image-1").await.is_err());
        assert!(store.documents("legalPage").await.unwrap().is_empty());
        assert_eq!(store.listings(), 2);
    }

    #[tokio::test]
    async fn offline_store_fails_until_back() {
        let store = InMemoryStore::new();
        store.set_offline(true);
        assert_eq!(
            store.document("x").await,
            Err(ContentError::StoreUnavailable("store is offline".into()))
        );
        store.set_offline(false);
        assert_eq!(store.document("x").await, Ok(None));
    }

    #[tokio::test]
    async fn patch_and_remove() {
        let store = InMemoryStore::new();
        store.insert(json!({ "_id": "p", "_type": "legalPage", "isActive": true }));
        assert!(store.patch("p", json!({ "isActive": false })));
        assert_eq!(
            store.document("p").await.unwrap().unwrap()["isActive"],
            json!(false)
        );
        assert!(store.remove("p"));
        assert!(!store.patch("p", json!({})));
    }
}
