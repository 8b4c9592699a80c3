//! Route definitions for the site.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /_snapshot/{*path}` - Snapshot JSON for lazy client loads
//! - everything else - Prerendered page from the route table

mod health;
mod page;
mod snapshot;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

pub use snapshot::SNAPSHOT_PREFIX;

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/_snapshot", get(snapshot::snapshot_handler))
        .route("/_snapshot/{*path}", get(snapshot::snapshot_handler))
        .fallback(page::page_handler)
        .with_state(state)
}

/// Serve robots.txt. Deny-listed prefixes are disallowed; everything else
/// relies on per-page robots directives.
async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let mut body = String::from("User-agent: *\n");
    for prefix in state.prerender.policy().prefixes() {
        body.push_str("Disallow: ");
        body.push_str(prefix);
        body.push('\n');
    }
    body.push_str("Allow: /\n");

    ([("content-type", "text/plain; charset=utf-8")], body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use vitrina_core::{
        Collection, ContentSnapshot, InitialPayload, MemoryRepository, PageKind, extract_payload,
    };

    use crate::config::Config;

    fn config() -> Config {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            base_url: "https://vitrina.ro".to_string(),
            site_name: "Vitrina".to_string(),
            clickhouse_url: "http://localhost:8123".to_string(),
            clickhouse_database: "vitrina".to_string(),
            fixtures_path: None,
            metrics_port: None,
            noindex_prefixes: None,
        }
    }

    fn fixtures() -> MemoryRepository {
        MemoryRepository::from_fixtures(&json!({
            "events": {
                "untold-2025": {
                    "title": "UNTOLD 2025",
                    "starts_at": "2025-08-07T16:00:00Z",
                    "venue": "Cluj Arena",
                    "city": "Cluj-Napoca",
                    "description": "Patru zile </script> de muzică."
                }
            },
            "movies": {
                "dune-2": { "title": "Dune: Partea a doua", "year": 2024 }
            },
            "embeds": {
                "abc123": { "title": "UNTOLD", "target_url": "/evenimente/untold-2025" }
            },
            "pages": {
                "/cont/setari": { "title": "Setări" }
            }
        }))
        .unwrap()
    }

    fn app() -> Router {
        router(AppState::with_repository(config(), Arc::new(fixtures())))
    }

    async fn get(uri: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "vitrina-site");
        assert_eq!(body["backend"], "custom");
        assert_eq!(body["routes"], 10);
        assert_eq!(body["cached_records"], 0);
    }

    #[tokio::test]
    async fn robots_txt_lists_denied_prefixes() {
        let body = body_text(get("/robots.txt").await).await;
        assert!(body.starts_with("User-agent: *\n"));
        assert!(body.contains("Disallow: /cont\n"));
        assert!(body.contains("Disallow: /_snapshot\n"));
    }

    #[tokio::test]
    async fn event_page_is_indexable_with_payload() {
        let response = get("/evenimente/untold-2025?utm_source=x").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "index, follow");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert!(response.headers().contains_key(header::ETAG));

        let html = body_text(response).await;
        assert!(html.contains("UNTOLD 2025"));
        assert!(html.contains(r#"<meta name="robots" content="index, follow">"#));
        assert!(html.contains(r#"href="https://vitrina.ro/evenimente/untold-2025""#));
        // One closing script tag: the payload's own.
        assert_eq!(html.matches("</script>").count(), 1);

        let payload = extract_payload(&html).unwrap();
        assert_eq!(payload.pathname, "/evenimente/untold-2025");
        assert_eq!(payload.snapshot.kind(), PageKind::Event);
        assert!(payload.snapshot.is_found());
    }

    #[tokio::test]
    async fn unknown_path_is_404_noindex() {
        let response = get("/nu-exista").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-robots-tag"], "noindex");

        let html = body_text(response).await;
        assert!(html.contains("Pagina nu există"));
        let payload = extract_payload(&html).unwrap();
        assert_eq!(payload.snapshot, ContentSnapshot::not_found(PageKind::Generic));
    }

    #[tokio::test]
    async fn embed_is_frameable_and_noindex() {
        let response = get("/embed/abc123").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "noindex");
        assert!(!response.headers().contains_key(header::X_FRAME_OPTIONS));
        let csp = response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap();
        assert!(csp.contains("frame-ancestors *"));
    }

    #[tokio::test]
    async fn denied_prefix_is_noindex_even_when_found() {
        let response = get("/cont/setari").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "noindex");
    }

    #[tokio::test]
    async fn empty_home_is_served_but_not_indexed() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "noindex");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=0, s-maxage=60, stale-while-revalidate=0"
        );

        let payload = extract_payload(&body_text(response).await).unwrap();
        assert_eq!(payload.snapshot.kind(), PageKind::Home);
        assert!(payload.snapshot.is_found());
    }

    #[tokio::test]
    async fn home_with_a_section_is_indexable() {
        let repository = fixtures().with_record(
            Collection::Sections,
            "featured-events",
            json!([{ "title": "UNTOLD 2025", "href": "/evenimente/untold-2025" }]),
        );
        let response = router(AppState::with_repository(config(), Arc::new(repository)))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "index, follow");
    }

    #[tokio::test]
    async fn matching_etag_is_not_modified() {
        let app = app();
        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/filme/dune-2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let etag = first.headers()[header::ETAG].clone();

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/filme/dune-2")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn non_get_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/filme/dune-2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn snapshot_endpoint_matches_page_payload() {
        let response = get("/_snapshot/filme/dune-2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-robots-tag"], "noindex");
        let payload: InitialPayload = serde_json::from_str(&body_text(response).await).unwrap();

        let page = body_text(get("/filme/dune-2").await).await;
        assert_eq!(payload, extract_payload(&page).unwrap());
    }

    #[tokio::test]
    async fn snapshot_endpoint_reports_not_found() {
        let body = body_text(get("/_snapshot/sport/nope").await).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "pathname": "/sport/nope",
                "snapshot": { "kind": "match", "notFound": true }
            })
        );
    }

    #[tokio::test]
    async fn snapshot_root_is_home() {
        let body = body_text(get("/_snapshot").await).await;
        let payload: InitialPayload = serde_json::from_str(&body).unwrap();
        assert_eq!(payload.pathname, "/");
        assert_eq!(payload.snapshot.kind(), PageKind::Home);
    }
}
