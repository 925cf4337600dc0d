//! Site configuration, read from TOML.
//!
//! Every key is optional; missing keys take the defaults below. `SITE_BASE_URL` in the
//! environment overrides `base_url` after the file is read.
//!
//! ```toml
//! base_url = "https://www.harbourline.example"
//! revalidate_secs = 60
//!
//! [cache]
//! stale_secs = 300
//! layout_stale_secs = 30
//! gc_secs = 120
//! retry = 3
//! timeout_ms = 10000
//! ```

use query_framework::{Backoff, QueryPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const BASE_URL_ENV: &str = "SITE_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid base_url '{0}': expected an http(s) URL")]
    BaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin used for canonical URLs, without a trailing slash.
    pub base_url: String,
    /// Age after which a page's queries refresh on the next request.
    pub revalidate_secs: u64,
    pub cache: CacheConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            revalidate_secs: crate::pages::REVALIDATE_SECS,
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub stale_secs: u64,
    /// Staleness window for layout-critical content (site settings).
    pub layout_stale_secs: u64,
    pub gc_secs: u64,
    pub retry: u32,
    pub backoff_initial_ms: u64,
    pub backoff_max_ms: u64,
    /// End-to-end limit per fetch, retries included. `0` disables it.
    pub timeout_ms: u64,
    /// Request buffer of the cache actor's mailbox.
    pub buffer: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: 300,
            layout_stale_secs: 30,
            gc_secs: 120,
            retry: 3,
            backoff_initial_ms: 1_000,
            backoff_max_ms: 30_000,
            timeout_ms: 10_000,
            buffer: 64,
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(source)?;
        config.validated()
    }

    /// Reads `path`, then applies the environment override.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if !crate::schema::validate::is_url(&self.base_url) {
            return Err(ConfigError::BaseUrl(self.base_url));
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        Ok(self)
    }

    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    /// Absolute URL of a site path such as `/team`.
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl CacheConfig {
    /// Policy for ordinary content areas.
    pub fn policy(&self) -> QueryPolicy {
        let timeout = (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms));
        QueryPolicy::default()
            .with_stale_time(Duration::from_secs(self.stale_secs))
            .with_gc_time(Duration::from_secs(self.gc_secs))
            .with_retry(self.retry)
            .with_backoff(Backoff {
                initial: Duration::from_millis(self.backoff_initial_ms),
                max: Duration::from_millis(self.backoff_max_ms),
                ..Backoff::default()
            })
            .with_timeout(timeout)
    }

    /// Policy for layout-critical content, which goes stale sooner.
    pub fn layout_policy(&self) -> QueryPolicy {
        self.policy()
            .with_stale_time(Duration::from_secs(self.layout_stale_secs))
    }
}
