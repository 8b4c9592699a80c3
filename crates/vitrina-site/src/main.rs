//! Vitrina site - HTTP server for prerendered content pages.
//!
//! Serves every page of the route space as HTML with the content snapshot
//! embedded, designed to be placed behind a CDN for edge caching.

use std::path::PathBuf;

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vitrina_site::metrics::{init_metrics, start_metrics_server};
use vitrina_site::{AppState, Config, router};

/// Vitrina site - prerendered pages with embedded content snapshots.
#[derive(Parser, Debug)]
#[command(name = "vitrina-site")]
#[command(about = "Prerendering server for the Vitrina content site", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Serve records from this JSON fixtures file instead of ClickHouse.
    /// Overrides `VITRINA_FIXTURES`.
    #[arg(long)]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(path) = args.fixtures {
        config.fixtures_path = Some(path);
    }
    let bind_addr = config.bind_addr.clone();

    if let Some(port) = config.metrics_port {
        let handle = init_metrics()?;
        start_metrics_server(port, handle).await?;
    }

    let state = AppState::new(config)?;
    let backend = state.backend.as_str();

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, backend, "starting vitrina site");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("vitrina site stopped");
    Ok(())
}

/// Resolves on Ctrl-C, letting in-flight renders finish.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
