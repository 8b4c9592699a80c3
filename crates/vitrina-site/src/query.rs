//! ClickHouse-backed content repository.
//!
//! Records live in one table:
//!
//! ```sql
//! CREATE TABLE content_records (
//!     collection LowCardinality(String),
//!     key String,
//!     body String,
//!     updated_at DateTime64(3)
//! ) ENGINE = ReplacingMergeTree(updated_at)
//! ORDER BY (collection, key);
//! ```
//!
//! Reads are point lookups on the primary key and take the latest body, so
//! they do not depend on merges having run.

use async_trait::async_trait;
use clickhouse::Client;
use serde::Deserialize;
use serde_json::Value;
use vitrina_core::{ContentRepository, RecordKey, RepositoryError};

/// Latest body for one `(collection, key)`.
pub const RECORD_QUERY: &str = "SELECT argMax(body, updated_at) AS body \
     FROM content_records \
     WHERE collection = ? AND key = ? \
     GROUP BY collection, key \
     LIMIT 1";

/// A row from the record lookup.
#[derive(Debug, Clone, Deserialize, clickhouse::Row)]
pub struct RecordRow {
    /// JSON document.
    pub body: String,
}

/// Reads content records from ClickHouse.
#[derive(Clone)]
pub struct ClickHouseRepository {
    client: Client,
}

impl ClickHouseRepository {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client for `url`, using `database`.
    pub fn connect(url: &str, database: &str) -> Self {
        Self::new(Client::default().with_url(url).with_database(database))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ContentRepository for ClickHouseRepository {
    async fn read(&self, key: &RecordKey) -> Result<Option<Value>, RepositoryError> {
        let row = self
            .client
            .query(RECORD_QUERY)
            .bind(key.collection.as_str())
            .bind(key.key.as_str())
            .fetch_optional::<RecordRow>()
            .await
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        match row {
            Some(row) => parse_body(&row.body),
            None => Ok(None),
        }
    }
}

/// Parse a stored body. A blank body counts as a deleted record.
fn parse_body(body: &str) -> Result<Option<Value>, RepositoryError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}
