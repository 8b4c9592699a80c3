//! Vitrina site - prerendered pages with embedded content snapshots.
//!
//! This crate is the HTTP server around `vitrina-core`. It renders every
//! path in the route space to a complete HTML document, embedding the loaded
//! snapshot so the client can hydrate without fetching it again. It is
//! designed to sit behind a CDN.
//!
//! # Architecture
//!
//! - **Repository**: ClickHouse (or a fixtures file) behind a moka read-through cache
//! - **Render**: maud templates per page kind, implementing the core render host
//! - **Routes**: axum router; a fallback handler serves the prerendered pages
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - URLs are validated (HTTPS/HTTP or site paths only) before use in attributes
//! - The embedded payload escapes `<`, `>` and `&`, so content cannot close its script block
//! - Strict Content-Security-Policy: no script execution at all
//! - X-Frame-Options: DENY everywhere except embeddable widgets

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod query;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::{AppState, Backend};
