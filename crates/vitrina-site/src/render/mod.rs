//! HTML rendering for Vitrina pages.
//!
//! [`SiteRenderer`] is the render host plugged into the prerender pass: it
//! turns a snapshot into body markup and head fields. Every page kind has a
//! renderer for its content and a not-found presentation; the dispatch is an
//! exhaustive match so a new kind cannot ship without both.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod countdown;
pub mod embed;
pub mod event;
pub mod generic;
pub mod listing;
pub mod movie;
pub mod sport;

use maud::Markup;
use vitrina_core::{ContentSnapshot, PageContent, PageHead, PayloadError, Prerendered, RenderHost};

use components::{DocumentParts, not_found_text, page_shell};

/// Render host for the site.
#[derive(Debug, Clone)]
pub struct SiteRenderer {
    site_name: String,
}

impl SiteRenderer {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    fn body(&self, snapshot: &ContentSnapshot) -> Markup {
        let Some(content) = snapshot.content() else {
            return components::not_found(snapshot.kind());
        };

        match content {
            PageContent::Home(home) => listing::render_home(home, &self.site_name),
            PageContent::BlackFriday(campaign) => listing::render_campaign(campaign),
            PageContent::Movies(movies) => listing::render_movies(movies),
            PageContent::Event(event) => event::render(event),
            PageContent::Match(fixture) => sport::render(fixture),
            PageContent::Movie(movie) => movie::render(movie),
            PageContent::Category(category) => listing::render_category(category),
            PageContent::Countdown(countdown) => countdown::render(countdown),
            PageContent::Embed(embed) => embed::render(embed),
            PageContent::Generic(page) => generic::render(page),
        }
    }
}

impl RenderHost for SiteRenderer {
    fn render_markup(&self, snapshot: &ContentSnapshot) -> String {
        self.body(snapshot).into_string()
    }

    fn head(&self, snapshot: &ContentSnapshot) -> PageHead {
        let Some(content) = snapshot.content() else {
            let (title, description) = not_found_text(snapshot.kind());
            return PageHead {
                title: title.to_string(),
                description: description.to_string(),
                image: None,
                og_type: "website".to_string(),
            };
        };

        match content {
            PageContent::Home(home) => listing::home_head(home, &self.site_name),
            PageContent::BlackFriday(campaign) => listing::campaign_head(campaign),
            PageContent::Movies(movies) => listing::movies_head(movies),
            PageContent::Event(event) => event::head(event),
            PageContent::Match(fixture) => sport::head(fixture),
            PageContent::Movie(movie) => movie::head(movie),
            PageContent::Category(category) => listing::category_head(category),
            PageContent::Countdown(countdown) => countdown::head(countdown),
            PageContent::Embed(embed) => embed::head(embed),
            PageContent::Generic(page) => generic::head(page),
        }
    }
}

/// Wrap a prerendered page in the document shell.
pub fn render_document(
    rendered: &Prerendered,
    canonical_url: &str,
    site_name: &str,
) -> Result<Markup, PayloadError> {
    let payload_json = rendered.payload.to_script_json()?;
    let parts = DocumentParts {
        head: &rendered.head,
        kind: rendered.route.kind,
        canonical_url,
        site_name,
        robots: rendered.robots(),
        payload_json: &payload_json,
    };
    Ok(page_shell(&parts, &rendered.markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_core::PageKind;

    #[test]
    fn not_found_markup_and_head_for_every_kind() {
        let renderer = SiteRenderer::new("Vitrina");
        for kind in PageKind::ALL {
            let snapshot = ContentSnapshot::not_found(kind);
            let (title, _) = not_found_text(kind);
            assert!(renderer.render_markup(&snapshot).contains(title), "{kind}");
            assert_eq!(renderer.head(&snapshot).title, title);
        }
    }
}
