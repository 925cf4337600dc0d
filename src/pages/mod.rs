//! # Page Data Assemblers
//!
//! Server-side composition of view-models. Each page runs its queries concurrently, waits
//! for all of them to settle, and merges the results with statically declared fallbacks,
//! so a missing or unreachable slice renders default copy instead of a blank section.
//! Only the legal page insists on its content being present.
//!
//! Queries go through a [`ContentSource`]: the [`QueryExecutor`] directly, or a
//! [`CachedSource`] over a page cache of its own that refreshes a page's data in the
//! background once it is older than the revalidation interval.

pub mod contact;
pub mod error;
pub mod home;
pub mod insights;
pub mod layout;
pub mod legal;
pub mod strategies;
pub mod team;

pub use error::PageError;

use crate::config::{CacheConfig, SiteConfig};
use crate::error::ContentError;
use crate::hooks::{ContentResource, HookError};
use crate::query::{QueryExecutor, QueryKey, QueryResult};
use async_trait::async_trait;
use futures::future::join_all;
use query_framework::{QueryClient, QueryPolicy};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default age after which a page's data refreshes on the next request.
pub const REVALIDATE_SECS: u64 = 60;

/// Where assemblers read content from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn load(&self, key: QueryKey) -> Result<QueryResult, ContentError>;
}

#[async_trait]
impl ContentSource for QueryExecutor {
    async fn load(&self, key: QueryKey) -> Result<QueryResult, ContentError> {
        self.run(&key).await
    }
}

/// Reads through a page cache with revalidation semantics: data younger than the
/// interval is served as-is, older data is served once more while a refresh runs.
///
/// The client must belong to a cache actor that hooks do not use, since every read
/// applies the page policy to the entry. Store failures are not retried here: a failed
/// refresh keeps serving the cached data, and a first load that fails falls back.
#[derive(Clone)]
pub struct CachedSource {
    client: QueryClient<ContentResource>,
    policy: QueryPolicy,
}

impl CachedSource {
    pub fn new(
        client: QueryClient<ContentResource>,
        revalidate: Duration,
        cache: &CacheConfig,
    ) -> Self {
        let policy = cache
            .policy()
            .with_stale_time(revalidate)
            .with_retry(0)
            .refetch_on_window_focus(false)
            .refetch_on_mount(false);
        Self { client, policy }
    }
}

#[async_trait]
impl ContentSource for CachedSource {
    async fn load(&self, key: QueryKey) -> Result<QueryResult, ContentError> {
        self.client
            .fetch(key, self.policy.clone())
            .await
            .map_err(|e| match HookError::from(e) {
                HookError::Content { error, .. } => error,
                HookError::Cache(e) => ContentError::StoreUnavailable(e.to_string()),
            })
    }
}

/// Runs every query at once and returns their outcomes in order. A failure does not
/// cancel the others.
pub async fn load_all(
    source: &dyn ContentSource,
    keys: Vec<QueryKey>,
) -> Vec<Result<QueryResult, ContentError>> {
    join_all(keys.into_iter().map(|key| source.load(key))).await
}

/// Decodes a singleton slice. `None` when the query failed, matched nothing, or returned
/// a shape the view-model cannot read; the caller substitutes its fallback.
pub(crate) fn decode_one<T: DeserializeOwned>(
    slice: &str,
    loaded: Result<QueryResult, ContentError>,
) -> Option<T> {
    let result = match loaded {
        Ok(result) => result,
        Err(error) => {
            warn!(slice, %error, "Slice unavailable, using fallback");
            return None;
        }
    };
    let Some(value) = result.one() else {
        debug!(slice, "Slice empty, using fallback");
        return None;
    };
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(slice, %error, "Slice has unexpected shape, using fallback");
            None
        }
    }
}

/// Decodes a list slice, skipping unreadable items. `None` when nothing usable remains.
pub(crate) fn decode_list<T: DeserializeOwned>(
    slice: &str,
    loaded: Result<QueryResult, ContentError>,
) -> Option<Vec<T>> {
    let result = match loaded {
        Ok(result) => result,
        Err(error) => {
            warn!(slice, %error, "Slice unavailable, using fallback");
            return None;
        }
    };
    let items: Vec<T> = result
        .many()
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(slice, %error, "Skipping unreadable item");
                None
            }
        })
        .collect();
    if items.is_empty() {
        debug!(slice, "Slice empty, using fallback");
        None
    } else {
        Some(items)
    }
}

/// What a page tells crawlers and browsers about itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
}

/// A view-model the rendering layer can draw.
pub trait Page: Serialize {
    /// Site path, e.g. `/team`.
    fn path(&self) -> String;

    fn metadata(&self, config: &SiteConfig) -> PageMetadata;
}

pub(crate) fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// A resolved image or file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// A call-to-action link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cta {
    pub label: String,
    pub href: String,
    #[serde(default = "Cta::default_variant")]
    pub variant: String,
}

impl Cta {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            variant: Self::default_variant(),
        }
    }

    fn default_variant() -> String {
        "primary".to_string()
    }
}

/// A stored slug, `{ "current": "global-equity" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// Authored SEO overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn singleton_slices_fall_back_on_absence_error_or_bad_shape() {
        let found: Option<Named> =
            decode_one("s", Ok(QueryResult::One(Some(json!({ "name": "Ada" })))));
        assert_eq!(found, Some(Named { name: "Ada".into() }));

        assert_eq!(decode_one::<Named>("s", Ok(QueryResult::One(None))), None);
        assert_eq!(
            decode_one::<Named>("s", Err(ContentError::StoreUnavailable("down".into()))),
            None
        );
        assert_eq!(
            decode_one::<Named>("s", Ok(QueryResult::One(Some(json!({ "name": null }))))),
            None
        );
    }

    #[test]
    fn list_slices_skip_unreadable_items() {
        let items: Option<Vec<Named>> = decode_list(
            "s",
            Ok(QueryResult::Many(vec![json!({ "name": "Ada" }), json!({ "name": 7 })])),
        );
        assert_eq!(items, Some(vec![Named { name: "Ada".into() }]));
        assert_eq!(decode_list::<Named>("s", Ok(QueryResult::Many(vec![]))), None);
    }

    #[test]
    fn cta_variant_defaults_to_primary() {
        let cta: Cta = serde_json::from_value(json!({ "label": "Go", "href": "/" })).unwrap();
        assert_eq!(cta, Cta::new("Go", "/"));
    }
}
