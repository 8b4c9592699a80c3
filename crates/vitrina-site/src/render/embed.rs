//! Embeddable widget. Rendered without site chrome.

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::EmbedContent;

use super::components::{format_datetime, is_safe_href, iso};

pub fn render(embed: &EmbedContent) -> Markup {
    let target = if is_safe_href(&embed.target_url) {
        embed.target_url.as_str()
    } else {
        "/"
    };

    html! {
        a class="embed-card" href=(target) target="_blank" rel="noopener" {
            div class="embed-title" { (embed.title) }
            @if let Some(headline) = &embed.headline {
                div class="tile-sub" { (headline) }
            }
            @if let Some(starts_at) = embed.starts_at {
                div class="tile-sub" {
                    time datetime=(iso(starts_at)) { (format_datetime(starts_at)) }
                }
            }
            span class="embed-cta" { "Detalii" }
        }
    }
}

pub fn head(embed: &EmbedContent) -> PageHead {
    PageHead {
        title: embed.title.clone(),
        description: embed.headline.clone().unwrap_or_default(),
        image: None,
        og_type: "website".to_string(),
    }
}
