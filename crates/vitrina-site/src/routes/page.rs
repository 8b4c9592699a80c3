//! Prerendered page handler.
//!
//! Every path not claimed by another route lands here: the route table
//! classifies it, the dispatcher loads exactly one snapshot, and the
//! document is returned with the snapshot embedded.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use vitrina_core::{PageKind, Prerendered};

use crate::error::SiteError;
use crate::render::{self, components};
use crate::state::AppState;

/// Render the page for the request path.
pub async fn page_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    request_headers: HeaderMap,
) -> Result<Response, SiteError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
        )
            .into_response());
    }

    let rendered = state.prerender.render(uri.path()).await;
    let canonical = state.config.absolute_url(&rendered.route.pathname);
    let document =
        render::render_document(&rendered, &canonical, &state.config.site_name)?.into_string();

    let headers = response_headers(&rendered, &document);

    if let (Some(etag), Some(candidate)) = (
        headers.get(header::ETAG),
        request_headers.get(header::IF_NONE_MATCH),
    ) {
        if etag == candidate {
            tracing::debug!(pathname = %rendered.route.pathname, "etag matched");
            return Ok((StatusCode::NOT_MODIFIED, headers).into_response());
        }
    }

    let status = if rendered.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, headers, document).into_response())
}

/// Content, security, cache and robots headers for a rendered page.
fn response_headers(rendered: &Prerendered, document: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let is_embed = rendered.route.kind == PageKind::Embed;

    // Content type
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(if is_embed {
            components::EMBED_CSP_HEADER
        } else {
            components::CSP_HEADER
        }),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    if !is_embed {
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    }

    // Robots
    headers.insert(
        "x-robots-tag",
        HeaderValue::from_static(rendered.robots().as_str()),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(document.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    let (max_age, s_maxage, swr) =
        determine_ttl(rendered.route.kind, rendered.snapshot().has_content());
    let cache_value =
        format!("public, max-age={max_age}, s-maxage={s_maxage}, stale-while-revalidate={swr}");
    if let Ok(val) = HeaderValue::from_str(&cache_value) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    headers
}

/// Determine TTL values (max-age, s-maxage, stale-while-revalidate) for a page.
///
/// Returns (browser_ttl, cdn_ttl, stale_while_revalidate) in seconds.
/// `has_content` is false for not-found pages and for landing pages whose
/// sections all came back empty.
fn determine_ttl(kind: PageKind, has_content: bool) -> (u32, u32, u32) {
    if !has_content {
        // Short CDN TTL so new content or a recovered backend shows quickly
        return (0, 60, 0);
    }

    match kind {
        PageKind::Match => (30, 60, 30), // live scores
        PageKind::Home | PageKind::Movies | PageKind::BlackFriday => (60, 300, 60),
        PageKind::Event
        | PageKind::Movie
        | PageKind::Category
        | PageKind::Countdown
        | PageKind::Embed => (60, 1800, 300),
        PageKind::Generic => (300, 3600, 600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_pages_cache_briefly() {
        for kind in PageKind::ALL {
            assert_eq!(determine_ttl(kind, false), (0, 60, 0));
        }
    }

    #[test]
    fn live_scores_cache_shortest() {
        let (_, live, _) = determine_ttl(PageKind::Match, true);
        for kind in PageKind::ALL {
            assert!(determine_ttl(kind, true).1 >= live, "{kind}");
        }
    }
}
