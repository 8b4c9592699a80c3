//! Hub renderers: home, movie hub, campaign landing and category pages.
//!
//! These pages are grids of teasers. Sections the loader reported empty get
//! an empty-state line instead of a grid.

use maud::{Markup, html};
use vitrina_core::snapshot::{CampaignContent, CategoryContent, HomeContent, MoviesContent};
use vitrina_core::{PageHead, Section};

use super::components::{facts, format_datetime, is_safe_url, listing_grid, section, truncate};

const EMPTY_SECTION: &str = "Momentan nu avem nimic de afișat aici.";

pub fn render_home(home: &HomeContent, site_name: &str) -> Markup {
    html! {
        div class="hero" {
            h1 { (site_name) }
            p class="lead" { "Evenimente, meciuri și filme, într-un singur loc." }
        }
        (section(section_title(Section::FeaturedEvents), &home.featured_events, EMPTY_SECTION))
        (section(section_title(Section::UpcomingMatches), &home.upcoming_matches, EMPTY_SECTION))
        (section(section_title(Section::NewMovies), &home.new_movies, EMPTY_SECTION))
        (section(section_title(Section::Categories), &home.categories, EMPTY_SECTION))
    }
}

pub fn home_head(home: &HomeContent, site_name: &str) -> PageHead {
    PageHead {
        title: site_name.to_string(),
        description: "Evenimente, meciuri și filme, într-un singur loc.".to_string(),
        image: first_image(home.featured_events.iter().chain(&home.new_movies)),
        og_type: "website".to_string(),
    }
}

pub fn render_movies(movies: &MoviesContent) -> Markup {
    html! {
        div class="hero" {
            h1 { "Filme" }
            p class="lead" { "Ce rulează acum în cinematografe și ce urmează." }
        }
        (section(section_title(Section::NowShowing), &movies.now_showing, EMPTY_SECTION))
        (section(section_title(Section::ComingSoon), &movies.coming_soon, EMPTY_SECTION))
    }
}

pub fn movies_head(movies: &MoviesContent) -> PageHead {
    PageHead {
        title: "Filme".to_string(),
        description: format!(
            "{} filme în cinematografe, {} în curând.",
            movies.now_showing.len(),
            movies.coming_soon.len()
        ),
        image: first_image(movies.now_showing.iter().chain(&movies.coming_soon)),
        og_type: "website".to_string(),
    }
}

pub fn render_campaign(campaign: &CampaignContent) -> Markup {
    html! {
        div class="hero" {
            h1 { (campaign.title) }
            @if !campaign.intro.is_empty() {
                p class="lead" { (campaign.intro) }
            }
        }
        (facts(&[
            ("Începe", campaign.starts_at.map(format_datetime)),
            ("Se termină", campaign.ends_at.map(format_datetime)),
        ]))
        (section("Oferte", &campaign.offers, "Ofertele apar în curând."))
    }
}

pub fn campaign_head(campaign: &CampaignContent) -> PageHead {
    PageHead {
        title: campaign.title.clone(),
        description: if campaign.intro.is_empty() {
            format!("{} oferte Black Friday", campaign.offers.len())
        } else {
            truncate(&campaign.intro, 200)
        },
        image: first_image(&campaign.offers),
        og_type: "website".to_string(),
    }
}

pub fn render_category(category: &CategoryContent) -> Markup {
    html! {
        div class="hero" {
            h1 {
                (category.name)
                @if let Some(year) = category.year {
                    " " (year)
                }
            }
            @if !category.description.is_empty() {
                p class="lead" { (category.description) }
            }
        }
        @if category.items.is_empty() {
            p class="empty-state" { (EMPTY_SECTION) }
        } @else {
            (listing_grid(&category.items))
        }
    }
}

pub fn category_head(category: &CategoryContent) -> PageHead {
    let title = match category.year {
        Some(year) => format!("{} {year}", category.name),
        None => category.name.clone(),
    };
    let description = if category.description.is_empty() {
        format!("{} recomandări în categoria {}", category.items.len(), title)
    } else {
        truncate(&category.description, 200)
    };

    PageHead {
        title,
        description,
        image: first_image(&category.items),
        og_type: "website".to_string(),
    }
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::FeaturedEvents => "Evenimente recomandate",
        Section::UpcomingMatches => "Meciuri în curând",
        Section::NewMovies => "Filme noi",
        Section::Categories => "Categorii",
        Section::NowShowing => "Acum în cinema",
        Section::ComingSoon => "În curând",
    }
}

fn first_image<'a>(
    items: impl IntoIterator<Item = &'a vitrina_core::ListingItem>,
) -> Option<String> {
    items
        .into_iter()
        .filter_map(|item| item.image.as_deref())
        .find(|url| is_safe_url(url))
        .map(str::to_string)
}
