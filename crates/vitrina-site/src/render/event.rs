//! Single event page.

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::EventContent;

use super::components::{facts, format_datetime, is_safe_url, iso, paragraphs, truncate};

pub fn render(event: &EventContent) -> Markup {
    let location = match (&event.venue, &event.city) {
        (Some(venue), Some(city)) => Some(format!("{venue}, {city}")),
        (Some(place), None) | (None, Some(place)) => Some(place.clone()),
        (None, None) => None,
    };

    html! {
        article class="event" {
            @if let Some(image) = event.image.as_deref().filter(|u| is_safe_url(u)) {
                img class="hero-image" src=(image) alt=(event.title);
            }
            div class="hero" {
                @if let Some(category) = &event.category {
                    div class="badges" { span class="badge" { (category) } }
                }
                h1 { (event.title) }
                p class="lead" {
                    time datetime=(iso(event.starts_at)) { (format_datetime(event.starts_at)) }
                }
            }
            (facts(&[
                ("Începe", Some(format_datetime(event.starts_at))),
                ("Se termină", event.ends_at.map(format_datetime)),
                ("Locație", location),
            ]))
            @if !event.description.is_empty() {
                (paragraphs(&event.description))
            }
        }
    }
}

pub fn head(event: &EventContent) -> PageHead {
    let mut description = format_datetime(event.starts_at);
    if let Some(city) = &event.city {
        description.push_str(", ");
        description.push_str(city);
    }
    if !event.description.is_empty() {
        description.push_str(". ");
        description.push_str(&truncate(&event.description, 160));
    }

    PageHead {
        title: event.title.clone(),
        description,
        image: event.image.clone(),
        og_type: "article".to_string(),
    }
}
