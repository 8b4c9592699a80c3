//! Prometheus metrics for the site.
//!
//! The core crate records through the `metrics` facade; this module installs
//! the Prometheus recorder and serves `/metrics` on a separate port.
//!
//! # Metric Naming Conventions
//!
//! - Prefix: `vitrina_`
//! - Suffix: unit or type (`_total`, `_seconds`)
//! - Labels: page kind, outcome, failure reason. Never pathnames.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, routing::get};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and describe the site's metrics.
///
/// Fails if a recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    register_metrics();

    Ok(handle)
}

/// Like [`init_metrics`] but returns `None` if a recorder is already
/// installed. Useful for tests.
pub fn try_init_metrics() -> Option<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().ok()?;
    register_metrics();
    Some(handle)
}

/// Bind `0.0.0.0:{port}` and serve `/metrics` in a background task.
pub async fn start_metrics_server(port: u16, handle: PrometheusHandle) -> anyhow::Result<()> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {addr}"))?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "metrics server stopped");
        }
    });

    Ok(())
}

fn register_metrics() {
    describe_counter!(
        "vitrina_page_renders_total",
        "Prerendered page views (labels: kind, outcome)"
    );
    describe_histogram!(
        "vitrina_render_duration_seconds",
        "Time from URL to rendered markup, including the content load (label: kind)"
    );
    describe_counter!(
        "vitrina_loader_failures_total",
        "Loads that produced a not-found snapshot (labels: kind, reason)"
    );
    describe_counter!(
        "vitrina_repository_cache_hits_total",
        "Record reads served from the in-process cache"
    );
    describe_counter!(
        "vitrina_repository_cache_misses_total",
        "Record reads forwarded to the backing repository"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_metrics_idempotent() {
        let handle1 = try_init_metrics();
        let handle2 = try_init_metrics();

        // At most one should succeed
        assert!(handle1.is_none() || handle2.is_none());
    }

    #[test]
    fn test_register_metrics_does_not_panic() {
        let _ = try_init_metrics();
        register_metrics();
        register_metrics();
    }
}
