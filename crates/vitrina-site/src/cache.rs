//! Read-through record caching with moka.
//!
//! Wraps any [`ContentRepository`] so repeated page views of the same
//! content skip ClickHouse. Only records that exist are cached; misses and
//! backend errors always go to the inner repository, so newly published
//! content shows up without waiting for an entry to expire.
//!
//! ## TTL tiers
//!
//! | Collection | TTL | Why it changes |
//! |------------|-----|----------------|
//! | matches | 30s | live scores |
//! | sections, campaigns | 2 min | editorial listings |
//! | events, movies, countdowns, embeds, categories | 10 min | content edits |
//! | pages | 1 hour | static text |

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use serde_json::Value;
use vitrina_core::{Collection, ContentRepository, RecordKey, RepositoryError};

/// Default cache capacity (number of records).
pub const DEFAULT_CACHE_CAPACITY: u64 = 50_000;

/// Cached record with metadata.
#[derive(Clone, Debug)]
pub struct CachedRecord {
    pub body: Arc<Value>,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// TTL values per collection tier.
pub mod ttl {
    use std::time::Duration;

    /// Live data (match scores) - 30 seconds
    pub const LIVE: Duration = Duration::from_secs(30);

    /// Editorial listings - 2 minutes
    pub const LISTINGS: Duration = Duration::from_secs(120);

    /// Detail pages - 10 minutes
    pub const CONTENT: Duration = Duration::from_secs(600);

    /// Static pages - 1 hour
    pub const STABLE: Duration = Duration::from_secs(3600);
}

/// TTL for records of `collection`.
pub fn ttl_for(collection: Collection) -> Duration {
    match collection {
        Collection::Matches => ttl::LIVE,
        Collection::Sections | Collection::Campaigns => ttl::LISTINGS,
        Collection::Events
        | Collection::Movies
        | Collection::Categories
        | Collection::Countdowns
        | Collection::Embeds => ttl::CONTENT,
        Collection::Pages => ttl::STABLE,
    }
}

struct CollectionExpiry;

impl Expiry<RecordKey, CachedRecord> for CollectionExpiry {
    fn expire_after_create(
        &self,
        key: &RecordKey,
        _value: &CachedRecord,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(ttl_for(key.collection))
    }
}

/// A repository with a moka read-through cache in front.
#[derive(Clone)]
pub struct CachedRepository<R> {
    inner: R,
    cache: Cache<RecordKey, CachedRecord>,
}

impl<R: ContentRepository> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: R, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .expire_after(CollectionExpiry)
            .build();

        tracing::info!(cache_capacity = capacity, "record cache initialized");

        Self { inner, cache }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Approximate number of cached records.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached record.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl<R: ContentRepository> ContentRepository for CachedRepository<R> {
    async fn read(&self, key: &RecordKey) -> Result<Option<Value>, RepositoryError> {
        if let Some(entry) = self.cache.get(key).await {
            tracing::debug!(record = %key, cached_at = %entry.cached_at, "cache hit");
            metrics::counter!("vitrina_repository_cache_hits_total").increment(1);
            return Ok(Some(Value::clone(&entry.body)));
        }

        tracing::debug!(record = %key, "cache miss");
        metrics::counter!("vitrina_repository_cache_misses_total").increment(1);

        let body = self.inner.read(key).await?;
        if let Some(body) = &body {
            let entry = CachedRecord {
                body: Arc::new(body.clone()),
                cached_at: chrono::Utc::now(),
            };
            self.cache.insert(key.clone(), entry).await;
        }

        Ok(body)
    }
}
