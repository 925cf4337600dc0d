use crate::config::SiteConfig;
use crate::hooks::{self, ContentHooks};
use crate::pages::contact::{self, ContactPage};
use crate::pages::home::{self, HomePage};
use crate::pages::insights::{self, InsightsPage};
use crate::pages::layout::{self, SiteLayout};
use crate::pages::legal::{self, LegalPage};
use crate::pages::strategies::{self, StrategiesPage};
use crate::pages::team::{self, TeamPage};
use crate::pages::{CachedSource, PageError};
use crate::query::{site_queries, QueryExecutor};
use crate::schema::{site_schema, SchemaError, SchemaRegistry};
use crate::store::ContentStore;
use crate::ui_state::UiState;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Schema rejected: {0}")]
    Schema(#[from] SchemaError),

    #[error("Cache task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The running content layer.
///
/// `SiteSystem` is responsible for:
/// - **Startup checks**: the schema registry and every catalog query are verified before
///   anything is spawned, so a bad definition fails here rather than on first render
/// - **Dependency wiring**: the hooks cache and the page cache are separate actors, both
///   receiving the same [`QueryExecutor`] as their context
/// - **Shutdown**: dropping every client closes both mailboxes
///
/// # Example
///
/// ```rust
/// use site_content::config::SiteConfig;
/// use site_content::lifecycle::SiteSystem;
/// use site_content::store::seed::seeded_store;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = SiteSystem::new(SiteConfig::default(), Arc::new(seeded_store()))?;
///     let team = system.team().await;
///     assert_eq!(team.leadership.len(), 2);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct SiteSystem {
    pub config: SiteConfig,
    pub registry: SchemaRegistry,
    /// Typed hooks for client components.
    pub hooks: ContentHooks,
    pub ui: UiState,
    source: CachedSource,
    handles: Vec<JoinHandle<()>>,
}

impl SiteSystem {
    /// Checks the schema and queries, then starts the cache actors.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: SiteConfig, store: Arc<dyn ContentStore>) -> Result<Self, SiteError> {
        let registry = site_schema()?;
        let catalog = site_queries();
        catalog.check(&registry)?;
        info!(
            types = registry.len(),
            queries = catalog.len(),
            "Content schema and queries checked"
        );

        let executor = Arc::new(QueryExecutor::new(store, catalog));
        let (hooks_actor, hooks_client) = hooks::new(config.cache.buffer);
        let (pages_actor, pages_client) = hooks::new(config.cache.buffer);
        let handles = vec![
            tokio::spawn(hooks_actor.run(executor.clone())),
            tokio::spawn(pages_actor.run(executor)),
        ];

        let source = CachedSource::new(pages_client, config.revalidate(), &config.cache);
        let hooks = ContentHooks::new(hooks_client, config.cache.clone());

        Ok(Self {
            config,
            registry,
            hooks,
            ui: UiState::new(),
            source,
            handles,
        })
    }

    pub async fn layout(&self) -> SiteLayout {
        layout::assemble(&self.source).await
    }

    pub async fn home(&self) -> HomePage {
        home::assemble(&self.source).await
    }

    pub async fn team(&self) -> TeamPage {
        team::assemble(&self.source).await
    }

    /// The legal page for a raw path segment such as `privacy-policy`.
    pub async fn legal(&self, kind: &str) -> Result<LegalPage, PageError> {
        legal::assemble(&self.source, kind).await
    }

    pub async fn contact(&self) -> ContactPage {
        contact::assemble(&self.source).await
    }

    pub async fn insights(&self) -> InsightsPage {
        insights::assemble(&self.source).await
    }

    pub async fn strategies(&self) -> StrategiesPage {
        strategies::assemble(&self.source).await
    }

    /// Drops every client and waits for both cache actors to exit.
    pub async fn shutdown(self) -> Result<(), SiteError> {
        info!("Shutting down content layer...");
        drop(self.hooks);
        drop(self.source);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Cache task failed: {:?}", e);
                return Err(e.into());
            }
        }
        info!("Content layer shutdown complete.");
        Ok(())
    }
}
