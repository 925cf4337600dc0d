//! # Typed Query Hooks
//!
//! Each content area of the site reads through a [`ContentHook`]: a catalog query, its
//! parameters, and the cache policy for that area, bound to the shared
//! [`QueryActor<ContentResource>`](query_framework::QueryActor).
//!
//! ## Structure
//!
//! - [`resource`] - [`ContentResource`], the [`QueryResource`](query_framework::QueryResource)
//!   implementation that runs catalog queries
//! - [`content_hook`] - [`ContentHook`] and [`HookError`]
//! - [`new()`] - Factory function that creates the cache actor and its client
//!
//! ## Policies
//!
//! | Hook | Staleness | Focus refetch |
//! |------|-----------|---------------|
//! | `site_settings` | layout (30 s) | yes |
//! | `content_new_about`, `content_new_approach` | default (5 min) | no |
//! | everything else | default (5 min) | yes |
//!
//! ## Usage
//!
//! ```rust
//! use query_framework::QueryHook;
//! use site_content::config::CacheConfig;
//! use site_content::hooks::{self, ContentHooks};
//! use site_content::query::{site_queries, QueryExecutor};
//! use site_content::store::seed::seeded_store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = QueryExecutor::new(Arc::new(seeded_store()), site_queries());
//!     let (actor, client) = hooks::new(16);
//!     tokio::spawn(actor.run(Arc::new(executor)));
//!
//!     let hooks = ContentHooks::new(client, CacheConfig::default());
//!     let mut statistics = hooks.statistics().observe().await?;
//!     let data = statistics.settled().await?;
//!     assert_eq!(data.one().unwrap()["items"].as_array().unwrap().len(), 3);
//!     Ok(())
//! }
//! ```

pub mod content_hook;
pub mod resource;

pub use content_hook::{ContentHook, HookError};
pub use resource::ContentResource;

use crate::config::CacheConfig;
use crate::query::catalog;
use crate::query::QueryKey;
use query_framework::{QueryActor, QueryClient, QueryPolicy};

/// Creates the content cache actor and its client.
pub fn new(buffer_size: usize) -> (QueryActor<ContentResource>, QueryClient<ContentResource>) {
    QueryActor::new(buffer_size)
}

/// Hands out the hook of every content area, all sharing one cache.
#[derive(Clone)]
pub struct ContentHooks {
    client: QueryClient<ContentResource>,
    cache: CacheConfig,
}

impl ContentHooks {
    pub fn new(client: QueryClient<ContentResource>, cache: CacheConfig) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &QueryClient<ContentResource> {
        &self.client
    }

    fn hook(&self, key: QueryKey, policy: QueryPolicy) -> ContentHook {
        ContentHook::new(self.client.clone(), key, policy)
    }

    pub fn site_settings(&self) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::SITE_SETTINGS),
            self.cache.layout_policy(),
        )
    }

    /// The hero section of `page` (`home`, `strategies`, `insights`, `contact`).
    pub fn hero(&self, page: &str) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::HERO_BY_PAGE).param("page", page),
            self.cache.policy(),
        )
    }

    pub fn team_page_hero(&self) -> ContentHook {
        self.hook(QueryKey::new(catalog::TEAM_PAGE_HERO), self.cache.policy())
    }

    pub fn team_members(&self) -> ContentHook {
        self.hook(QueryKey::new(catalog::TEAM_MEMBERS), self.cache.policy())
    }

    pub fn legal_page(&self, kind: &str) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::LEGAL_PAGE_BY_TYPE).param("type", kind),
            self.cache.policy(),
        )
    }

    pub fn contact_details(&self) -> ContentHook {
        self.hook(QueryKey::new(catalog::CONTACT_DETAILS), self.cache.policy())
    }

    pub fn insights(&self) -> ContentHook {
        self.hook(QueryKey::new(catalog::INSIGHTS), self.cache.policy())
    }

    pub fn statistics(&self) -> ContentHook {
        self.hook(QueryKey::new(catalog::STATISTICS), self.cache.policy())
    }

    pub fn strategy_categories(&self) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::STRATEGY_CATEGORIES),
            self.cache.policy(),
        )
    }

    pub fn investment_strategies(&self) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::INVESTMENT_STRATEGIES),
            self.cache.policy(),
        )
    }

    pub fn content_new_about(&self) -> ContentHook {
        self.content_new("about")
    }

    pub fn content_new_approach(&self) -> ContentHook {
        self.content_new("approach")
    }

    fn content_new(&self, section: &str) -> ContentHook {
        self.hook(
            QueryKey::new(catalog::CONTENT_NEW_BY_SECTION).param("section", section),
            self.cache.policy().refetch_on_window_focus(false),
        )
    }

    /// Tells the cache the window regained focus. Returns how many entries refetch.
    pub async fn focus_regained(&self) -> Result<usize, HookError> {
        Ok(self.client.focus_regained().await?)
    }
}
