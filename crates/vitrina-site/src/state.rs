//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::Context;
use vitrina_core::{ContentRepository, Dispatcher, IndexPolicy, MemoryRepository, PrerenderHost, RouteTable};

use crate::cache::CachedRepository;
use crate::config::Config;
use crate::query::ClickHouseRepository;
use crate::render::SiteRenderer;

/// Repository used by the site: any backend behind the record cache.
pub type SiteRepository = CachedRepository<Arc<dyn ContentRepository>>;

/// Prerender pass wired to the site's repository and renderer.
pub type SitePrerender = PrerenderHost<SiteRepository, SiteRenderer>;

/// Where records are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    ClickHouse,
    Fixtures,
    /// A repository handed in by the caller.
    Custom,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::ClickHouse => "clickhouse",
            Backend::Fixtures => "fixtures",
            Backend::Custom => "custom",
        }
    }
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Route table, dispatcher, render host and index policy.
    pub prerender: Arc<SitePrerender>,

    pub backend: Backend,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Serves from the fixtures file when one is configured, otherwise from
    /// ClickHouse.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let (backend, repository) = open_repository(&config)?;
        let mut state = Self::with_repository(config, repository);
        state.backend = backend;
        Ok(state)
    }

    /// Create application state over an existing repository.
    pub fn with_repository(config: Config, repository: Arc<dyn ContentRepository>) -> Self {
        let policy = match &config.noindex_prefixes {
            Some(prefixes) => IndexPolicy::new().with_prefixes(prefixes),
            None => IndexPolicy::new(),
        };

        let prerender = PrerenderHost::new(
            RouteTable::shared(),
            Dispatcher::new(CachedRepository::new(repository)),
            SiteRenderer::new(config.site_name.clone()),
        )
        .with_policy(policy);

        tracing::info!(
            routes = prerender.routes().descriptors().len(),
            noindex_prefixes = ?prerender.policy().prefixes(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            prerender: Arc::new(prerender),
            backend: Backend::Custom,
        }
    }
}

fn open_repository(config: &Config) -> anyhow::Result<(Backend, Arc<dyn ContentRepository>)> {
    if let Some(path) = &config.fixtures_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures {}", path.display()))?;
        let repository = MemoryRepository::from_fixtures_str(&text)
            .with_context(|| format!("invalid fixtures {}", path.display()))?;
        tracing::info!(path = %path.display(), records = repository.len(), "serving from fixtures");
        return Ok((Backend::Fixtures, Arc::new(repository)));
    }

    tracing::info!(
        url = %config.clickhouse_url,
        database = %config.clickhouse_database,
        "serving from ClickHouse"
    );
    let repository =
        ClickHouseRepository::connect(&config.clickhouse_url, &config.clickhouse_database);
    Ok((Backend::ClickHouse, Arc::new(repository)))
}
