//! Error types for the site.
//!
//! Missing content is not an error here: it renders as the kind's not-found
//! page. These errors cover failures of the server itself and are rendered
//! as plain HTML error pages that are never indexed.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Site error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The embedded payload could not be encoded.
    #[error("payload error: {0}")]
    Payload(#[from] vitrina_core::PayloadError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match &self {
            Self::Payload(err) => tracing::error!(error = %err, "payload encoding failed"),
            Self::Internal(err) => tracing::error!(error = %err, "internal server error"),
        }

        let title = "Eroare internă";
        let message = "A apărut o eroare. Te rugăm să încerci din nou în câteva momente.";

        let markup = html! {
            (DOCTYPE)
            html lang="ro" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Înapoi la prima pagină" }
                    }
                }
            }
        };

        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response();
        let headers = response.headers_mut();
        headers.insert("x-robots-tag", HeaderValue::from_static("noindex"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}
