//! Content repository interface.
//!
//! The repository is a read-only key → record store. Records are JSON
//! documents; loaders decode them into typed content. Any caching or
//! consistency guarantees belong to the implementation, not to the core.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, RepositoryError, Result};

/// Record collections known to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Events,
    Matches,
    Movies,
    Categories,
    Countdowns,
    Embeds,
    /// Static pages keyed by pathname.
    Pages,
    /// Listing sections keyed by [`Section::key`](crate::Section::key).
    Sections,
    /// Seasonal campaigns keyed by campaign slug.
    Campaigns,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Collection; 9] = [
        Collection::Events,
        Collection::Matches,
        Collection::Movies,
        Collection::Categories,
        Collection::Countdowns,
        Collection::Embeds,
        Collection::Pages,
        Collection::Sections,
        Collection::Campaigns,
    ];

    /// Storage name of the collection.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Matches => "matches",
            Collection::Movies => "movies",
            Collection::Categories => "categories",
            Collection::Countdowns => "countdowns",
            Collection::Embeds => "embeds",
            Collection::Pages => "pages",
            Collection::Sections => "sections",
            Collection::Campaigns => "campaigns",
        }
    }

    /// Look up a collection by its storage name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

/// Address of a single record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub collection: Collection,
    pub key: String,
}

impl RecordKey {
    pub fn new(collection: Collection, key: impl Into<String>) -> Self {
        Self {
            collection,
            key: key.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection.as_str(), self.key)
    }
}

/// Async, read-only access to content records.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Read one record. `Ok(None)` means the record does not exist.
    async fn read(&self, key: &RecordKey) -> std::result::Result<Option<Value>, RepositoryError>;
}

#[async_trait]
impl<R: ContentRepository + ?Sized> ContentRepository for Arc<R> {
    async fn read(&self, key: &RecordKey) -> std::result::Result<Option<Value>, RepositoryError> {
        (**self).read(key).await
    }
}

/// In-memory repository, seeded from code or from a fixtures document.
///
/// Clones share the same records. Counts reads so callers can verify how
/// many lookups a page view performed.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: RwLock<HashMap<RecordKey, Value>>,
    failing: RwLock<HashSet<Collection>>,
    reads: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a fixtures document shaped as
    /// `{ "<collection>": { "<key>": <record>, ... }, ... }`.
    pub fn from_fixtures(fixtures: &Value) -> Result<Self> {
        let collections = fixtures
            .as_object()
            .ok_or_else(|| Error::InvalidFixtures("top level must be an object".to_string()))?;

        let repository = Self::new();
        for (name, records) in collections {
            let collection = Collection::from_name(name)
                .ok_or_else(|| Error::InvalidFixtures(format!("unknown collection '{name}'")))?;
            let records = records.as_object().ok_or_else(|| {
                Error::InvalidFixtures(format!("collection '{name}' must be an object"))
            })?;
            for (key, body) in records {
                repository.insert(collection, key.clone(), body.clone());
            }
        }

        tracing::info!(records = repository.len(), "fixtures loaded");
        Ok(repository)
    }

    /// Parse a fixtures document from JSON text.
    pub fn from_fixtures_str(text: &str) -> Result<Self> {
        let fixtures: Value = serde_json::from_str(text)?;
        Self::from_fixtures(&fixtures)
    }

    /// Insert or replace a record.
    pub fn insert(&self, collection: Collection, key: impl Into<String>, body: Value) {
        self.inner
            .records
            .write()
            .insert(RecordKey::new(collection, key), body);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_record(self, collection: Collection, key: impl Into<String>, body: Value) -> Self {
        self.insert(collection, key, body);
        self
    }

    /// Make every read from `collection` fail as unavailable.
    pub fn fail_collection(&self, collection: Collection) {
        self.inner.failing.write().insert(collection);
    }

    /// Number of `read` calls served so far.
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn read(&self, key: &RecordKey) -> std::result::Result<Option<Value>, RepositoryError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);

        if self.inner.failing.read().contains(&key.collection) {
            return Err(RepositoryError::Unavailable(format!(
                "collection {} is offline",
                key.collection.as_str()
            )));
        }

        Ok(self.inner.records.read().get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_read_hit_and_miss() {
        let repo = MemoryRepository::new().with_record(
            Collection::Events,
            "untold-2025",
            json!({ "title": "UNTOLD" }),
        );

        let hit = repo
            .read(&RecordKey::new(Collection::Events, "untold-2025"))
            .await
            .unwrap();
        assert_eq!(hit, Some(json!({ "title": "UNTOLD" })));

        let miss = repo
            .read(&RecordKey::new(Collection::Movies, "untold-2025"))
            .await
            .unwrap();
        assert!(miss.is_none());
        assert_eq!(repo.read_count(), 2);
    }

    #[tokio::test]
    async fn failing_collection_returns_unavailable() {
        let repo = MemoryRepository::new();
        repo.fail_collection(Collection::Sections);

        let result = repo
            .read(&RecordKey::new(Collection::Sections, "featured-events"))
            .await;
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));

        let other = repo.read(&RecordKey::new(Collection::Events, "x")).await;
        assert!(matches!(other, Ok(None)));
    }

    #[tokio::test]
    async fn clones_share_records() {
        let repo = MemoryRepository::new();
        let clone = repo.clone();
        clone.insert(Collection::Pages, "/despre", json!({ "title": "Despre" }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn arc_dyn_repository_delegates() {
        let repo: Arc<dyn ContentRepository> = Arc::new(
            MemoryRepository::new().with_record(Collection::Movies, "dune", json!({})),
        );
        let hit = repo
            .read(&RecordKey::new(Collection::Movies, "dune"))
            .await
            .unwrap();
        assert!(hit.is_some());
    }

    #[test]
    fn fixtures_load_by_collection() {
        let repo = MemoryRepository::from_fixtures(&json!({
            "events": { "a": {}, "b": {} },
            "pages": { "/despre": { "title": "Despre" } },
        }))
        .unwrap();
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn fixtures_reject_unknown_collection() {
        let err = MemoryRepository::from_fixtures(&json!({ "profiles": {} })).unwrap_err();
        assert!(err.to_string().contains("profiles"));
    }

    #[test]
    fn fixtures_reject_non_object() {
        assert!(MemoryRepository::from_fixtures(&json!([])).is_err());
        assert!(MemoryRepository::from_fixtures(&json!({ "events": [] })).is_err());
        assert!(MemoryRepository::from_fixtures_str("not json").is_err());
    }

    #[test]
    fn collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_name(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::from_name("nope"), None);
    }

    #[test]
    fn record_key_display() {
        let key = RecordKey::new(Collection::Categories, "filme/2026");
        assert_eq!(key.to_string(), "categories/filme/2026");
    }
}
