//! # Content Store
//!
//! The store is the external system of record for document instances and binary assets.
//! This layer only reads from it, through the [`ContentStore`] trait.
//!
//! Documents are Sanity-shaped JSON objects: `_id` and `_type` system fields next to the
//! declared fields, references as `{ "_ref": "<id>" }`, images and files as
//! `{ "asset": { "_ref": "<asset id>" }, "alt": "..." }`.
//!
//! [`InMemoryStore`] is the reference implementation used by the demo binary and tests.

pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;

use crate::error::ContentError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document instance.
pub type Document = Map<String, Value>;

/// Metadata of a binary asset, as resolved at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub mime_type: String,
}

impl Asset {
    pub fn image(id: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        let url = url.into();
        let mime_type = if url.ends_with(".png") {
            "image/png"
        } else if url.ends_with(".webp") {
            "image/webp"
        } else {
            "image/jpeg"
        };
        Self {
            id: id.into(),
            url,
            alt: None,
            width: Some(width),
            height: Some(height),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn file(
        id: impl Into<String>,
        url: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            alt: None,
            width: None,
            height: None,
            mime_type: mime_type.into(),
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Read access to the content store.
///
/// `documents` returns every instance of a type in the store's natural order; the query
/// layer filters, sorts and projects on top of it.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn documents(&self, type_name: &str) -> Result<Vec<Document>, ContentError>;

    async fn document(&self, id: &str) -> Result<Option<Document>, ContentError>;

    async fn asset(&self, asset_id: &str) -> Result<Option<Asset>, ContentError>;
}
