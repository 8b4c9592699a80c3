//! Single movie page.

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::MovieContent;

use super::components::{facts, format_date, is_safe_url, paragraphs, truncate};

pub fn render(movie: &MovieContent) -> Markup {
    let runtime = movie
        .runtime_minutes
        .map(|minutes| format!("{}h {:02}min", minutes / 60, minutes % 60));

    html! {
        article class="movie" {
            div class="poster-layout" {
                div {
                    @if let Some(poster) = movie.poster.as_deref().filter(|u| is_safe_url(u)) {
                        img class="poster" src=(poster) alt=(movie.title);
                    }
                }
                div {
                    div class="hero" {
                        h1 {
                            (movie.title)
                            @if let Some(year) = movie.year {
                                " (" (year) ")"
                            }
                        }
                        @if let Some(original) = &movie.original_title {
                            p class="lead" { (original) }
                        }
                    }
                    @if !movie.genres.is_empty() {
                        div class="badges" {
                            @for genre in &movie.genres {
                                span class="badge" { (genre) }
                            }
                        }
                    }
                    (facts(&[
                        ("Premiera", movie.release_date.map(format_date)),
                        ("Durata", runtime),
                    ]))
                    @if !movie.synopsis.is_empty() {
                        (paragraphs(&movie.synopsis))
                    }
                }
            }
        }
    }
}

pub fn head(movie: &MovieContent) -> PageHead {
    let title = match movie.year {
        Some(year) => format!("{} ({year})", movie.title),
        None => movie.title.clone(),
    };
    let description = if movie.synopsis.is_empty() {
        movie.genres.join(", ")
    } else {
        truncate(&movie.synopsis, 200)
    };

    PageHead {
        title,
        description,
        image: movie.poster.clone(),
        og_type: "video.movie".to_string(),
    }
}
