//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Public base URL, used for canonical and Open Graph URLs.
    /// e.g., "https://vitrina.ro"
    pub base_url: String,

    /// Site name shown in page titles and OG tags.
    pub site_name: String,

    /// ClickHouse connection URL.
    pub clickhouse_url: String,

    /// ClickHouse database name.
    pub clickhouse_database: String,

    /// Fixtures file. When set, content is served from memory instead of
    /// ClickHouse.
    pub fixtures_path: Option<PathBuf>,

    /// Port for the Prometheus `/metrics` endpoint, if enabled.
    pub metrics_port: Option<u16>,

    /// Path prefixes that are never indexed. `None` keeps the defaults.
    pub noindex_prefixes: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `VITRINA_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `VITRINA_BASE_URL`: Base URL for links/OG tags (default: "http://localhost:8080")
    /// - `VITRINA_SITE_NAME`: Site name (default: "Vitrina")
    /// - `CLICKHOUSE_URL`: ClickHouse URL (default: "http://localhost:8123")
    /// - `CLICKHOUSE_DATABASE`: Database name (default: "vitrina")
    /// - `VITRINA_FIXTURES`: JSON fixtures file served from memory
    /// - `VITRINA_METRICS_PORT`: Enables the Prometheus endpoint on this port
    /// - `VITRINA_NOINDEX_PREFIXES`: Comma-separated path prefixes never indexed
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("VITRINA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let base_url = std::env::var("VITRINA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("VITRINA_SITE_NAME").unwrap_or_else(|_| "Vitrina".to_string());

        let clickhouse_url =
            std::env::var("CLICKHOUSE_URL").unwrap_or_else(|_| "http://localhost:8123".to_string());

        let clickhouse_database =
            std::env::var("CLICKHOUSE_DATABASE").unwrap_or_else(|_| "vitrina".to_string());

        let fixtures_path = std::env::var("VITRINA_FIXTURES")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let metrics_port = match std::env::var("VITRINA_METRICS_PORT") {
            Ok(port) if !port.trim().is_empty() => Some(
                port.trim()
                    .parse::<u16>()
                    .with_context(|| format!("invalid VITRINA_METRICS_PORT: {port}"))?,
            ),
            _ => None,
        };

        let noindex_prefixes = std::env::var("VITRINA_NOINDEX_PREFIXES").ok().map(|list| {
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        });

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            clickhouse_url = %clickhouse_url,
            fixtures = ?fixtures_path,
            metrics_port = ?metrics_port,
            "site configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            clickhouse_url,
            clickhouse_database,
            fixtures_path,
            metrics_port,
            noindex_prefixes,
        })
    }

    /// Absolute URL for a site pathname.
    pub fn absolute_url(&self, pathname: &str) -> String {
        if pathname == "/" {
            format!("{}/", self.base_url)
        } else {
            format!("{}{}", self.base_url, pathname)
        }
    }
}
