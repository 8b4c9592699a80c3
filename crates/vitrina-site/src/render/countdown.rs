//! Countdown page.
//!
//! The target moment is rendered as a fixed timestamp, never as time
//! remaining, so the markup depends only on the snapshot.

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::CountdownContent;

use super::components::{format_datetime, is_safe_url, iso, paragraphs, truncate};

pub fn render(countdown: &CountdownContent) -> Markup {
    html! {
        article class="countdown" {
            @if let Some(image) = countdown.image.as_deref().filter(|u| is_safe_url(u)) {
                img class="hero-image" src=(image) alt=(countdown.title);
            }
            h1 { (countdown.title) }
            div class="countdown-target" {
                time datetime=(iso(countdown.target)) { (format_datetime(countdown.target)) }
            }
            @if !countdown.description.is_empty() {
                (paragraphs(&countdown.description))
            }
        }
    }
}

pub fn head(countdown: &CountdownContent) -> PageHead {
    let when = format!("Numărătoare inversă până pe {}", format_datetime(countdown.target));
    let description = if countdown.description.is_empty() {
        when
    } else {
        format!("{when}. {}", truncate(&countdown.description, 160))
    };

    PageHead {
        title: countdown.title.clone(),
        description,
        image: countdown.image.clone(),
        og_type: "website".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn render_is_stable() {
        let countdown = CountdownContent {
            id: "revelion-2026".to_string(),
            title: "Revelion 2026".to_string(),
            target: Utc.with_ymd_and_hms(2025, 12, 31, 22, 0, 0).unwrap(),
            description: String::new(),
            image: None,
        };
        let first = render(&countdown).into_string();
        assert_eq!(first, render(&countdown).into_string());
        assert!(first.contains("datetime=\"2025-12-31T22:00:00Z\""));
        assert!(head(&countdown).description.contains("31 decembrie 2025"));
    }
}
