//! Static pages addressed by pathname (about, terms, contact...).

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::GenericPage;

use super::components::{paragraphs, truncate};

pub fn render(page: &GenericPage) -> Markup {
    html! {
        article class="page" {
            div class="hero" { h1 { (page.title) } }
            (paragraphs(&page.body))
        }
    }
}

pub fn head(page: &GenericPage) -> PageHead {
    let first_paragraph = page.body.split("\n\n").next().unwrap_or_default().trim();
    PageHead {
        title: page.title.clone(),
        description: truncate(first_paragraph, 200),
        image: None,
        og_type: "website".to_string(),
    }
}
