//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Record source: `clickhouse`, `fixtures` or `custom`.
    backend: &'static str,
    routes: usize,
    cached_records: u64,
}

/// Reports which backend the site reads from and how warm its record cache
/// is. Never touches the repository, so load balancer checks stay cheap
/// during a backend outage.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let prerender = &state.prerender;
    Json(HealthResponse {
        status: "ok",
        service: "vitrina-site",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.backend.as_str(),
        routes: prerender.routes().descriptors().len(),
        cached_records: prerender.dispatcher().repository().entry_count(),
    })
}
