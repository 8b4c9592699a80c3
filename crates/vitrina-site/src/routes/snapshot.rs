//! JSON snapshot endpoint for lazy client loads.
//!
//! `GET /_snapshot/{*path}` resolves and loads `/{path}` exactly as the page
//! handler does and returns the [`InitialPayload`] as JSON. Not-found
//! snapshots are returned with status 200; the `notFound` flag carries the
//! outcome.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, Uri, header};
use axum::response::{IntoResponse, Response};
use vitrina_core::InitialPayload;

use crate::state::AppState;

/// Prefix the endpoint is mounted under.
pub const SNAPSHOT_PREFIX: &str = "/_snapshot";

pub async fn snapshot_handler(State(state): State<AppState>, uri: Uri) -> Response {
    // Raw path, so percent-escapes are decoded once by the route table.
    let target = uri.path().strip_prefix(SNAPSHOT_PREFIX).unwrap_or("/");
    let (route, snapshot) = state.prerender.load(target).await;

    tracing::debug!(
        pathname = %route.pathname,
        kind = %route.kind,
        found = snapshot.is_found(),
        "snapshot served"
    );

    let payload = InitialPayload::new(route.pathname, snapshot);
    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=30")),
            (
                header::HeaderName::from_static("x-robots-tag"),
                HeaderValue::from_static("noindex"),
            ),
        ],
        Json(payload),
    )
        .into_response()
}
