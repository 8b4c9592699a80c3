//! Content snapshot model.
//!
//! A [`ContentSnapshot`] is the immutable result of loading content for one
//! page view. It is either the kind-specific content ([`PageContent`]) or a
//! not-found marker carrying only the kind. Both serialize with a `kind`
//! field:
//!
//! ```json
//! {"kind":"event","slug":"untold-2025","title":"UNTOLD", ...}
//! {"kind":"event","notFound":true}
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kind::PageKind;

/// A teaser linking to another page, used by hub and landing sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    /// Display title.
    pub title: String,
    /// Site-relative or absolute link target.
    pub href: String,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Secondary line (venue, competition, genre...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// When the listed item happens, if it is dated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
}

/// Named listing sections read by the composite loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Home: highlighted events.
    FeaturedEvents,
    /// Home: next sports fixtures.
    UpcomingMatches,
    /// Home: recently added movies.
    NewMovies,
    /// Home: category hubs.
    Categories,
    /// Movies: in cinemas now.
    NowShowing,
    /// Movies: announced releases.
    ComingSoon,
}

impl Section {
    /// Repository key of the section record.
    pub fn key(self) -> &'static str {
        match self {
            Section::FeaturedEvents => "featured-events",
            Section::UpcomingMatches => "upcoming-matches",
            Section::NewMovies => "new-movies",
            Section::Categories => "categories",
            Section::NowShowing => "now-showing",
            Section::ComingSoon => "coming-soon",
        }
    }
}

/// Home page sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeContent {
    pub featured_events: Vec<ListingItem>,
    pub upcoming_matches: Vec<ListingItem>,
    pub new_movies: Vec<ListingItem>,
    pub categories: Vec<ListingItem>,
    /// Sections that came back empty, failed, or were missing.
    #[serde(default)]
    pub empty_sections: Vec<Section>,
}

/// Movie hub sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviesContent {
    pub now_showing: Vec<ListingItem>,
    pub coming_soon: Vec<ListingItem>,
    /// Sections that came back empty, failed, or were missing.
    #[serde(default)]
    pub empty_sections: Vec<Section>,
}

/// Seasonal campaign landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContent {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub offers: Vec<ListingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Final or live score of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContent {
    #[serde(default)]
    pub id: String,
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    #[serde(default)]
    pub venue: Option<String>,
    /// TV channels / streams carrying the match.
    #[serde(default)]
    pub broadcasters: Vec<String>,
    #[serde(default)]
    pub score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieContent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u16>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// A category hub, optionally scoped to one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContent {
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<ListingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownContent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub target: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Compact widget embedded on third-party pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub headline: Option<String>,
    /// Where a click on the widget leads.
    pub target_url: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

/// Static page addressed by its pathname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericPage {
    #[serde(default)]
    pub path: String,
    pub title: String,
    /// Plain text body; paragraphs separated by blank lines.
    #[serde(default)]
    pub body: String,
}

/// Kind-specific content. The variant always agrees with the kind it was
/// loaded for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Home(HomeContent),
    BlackFriday(CampaignContent),
    Movies(MoviesContent),
    Event(EventContent),
    Match(MatchContent),
    Movie(MovieContent),
    Category(CategoryContent),
    Countdown(CountdownContent),
    Embed(EmbedContent),
    Generic(GenericPage),
}

impl PageContent {
    /// The page kind this content belongs to.
    pub fn kind(&self) -> PageKind {
        match self {
            PageContent::Home(_) => PageKind::Home,
            PageContent::BlackFriday(_) => PageKind::BlackFriday,
            PageContent::Movies(_) => PageKind::Movies,
            PageContent::Event(_) => PageKind::Event,
            PageContent::Match(_) => PageKind::Match,
            PageContent::Movie(_) => PageKind::Movie,
            PageContent::Category(_) => PageKind::Category,
            PageContent::Countdown(_) => PageKind::Countdown,
            PageContent::Embed(_) => PageKind::Embed,
            PageContent::Generic(_) => PageKind::Generic,
        }
    }

    /// True for a landing page whose every section came back empty.
    pub fn is_empty(&self) -> bool {
        match self {
            PageContent::Home(home) => {
                home.featured_events.is_empty()
                    && home.upcoming_matches.is_empty()
                    && home.new_movies.is_empty()
                    && home.categories.is_empty()
            }
            PageContent::Movies(movies) => {
                movies.now_showing.is_empty() && movies.coming_soon.is_empty()
            }
            _ => false,
        }
    }
}

/// Serialized as the literal `true`; deserializing anything else fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotFoundFlag;

impl Serialize for NotFoundFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for NotFoundFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(NotFoundFlag)
        } else {
            Err(D::Error::custom("notFound must be true"))
        }
    }
}

/// Result of loading content for one page view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentSnapshot {
    /// Nothing renderable could be loaded for this kind.
    NotFound {
        kind: PageKind,
        #[serde(rename = "notFound")]
        not_found: NotFoundFlag,
    },
    /// Content was loaded.
    Found(PageContent),
}

impl ContentSnapshot {
    /// Snapshot for loaded content.
    pub fn found(content: PageContent) -> Self {
        ContentSnapshot::Found(content)
    }

    /// Not-found snapshot for `kind`.
    pub fn not_found(kind: PageKind) -> Self {
        ContentSnapshot::NotFound {
            kind,
            not_found: NotFoundFlag,
        }
    }

    /// The page kind this snapshot was loaded for.
    pub fn kind(&self) -> PageKind {
        match self {
            ContentSnapshot::NotFound { kind, .. } => *kind,
            ContentSnapshot::Found(content) => content.kind(),
        }
    }

    /// Whether content was loaded.
    pub fn is_found(&self) -> bool {
        matches!(self, ContentSnapshot::Found(_))
    }

    /// Whether there is content worth showing: found, and not a landing
    /// page with nothing in it.
    pub fn has_content(&self) -> bool {
        self.content().is_some_and(|content| !content.is_empty())
    }

    /// Loaded content, if any.
    pub fn content(&self) -> Option<&PageContent> {
        match self {
            ContentSnapshot::Found(content) => Some(content),
            ContentSnapshot::NotFound { .. } => None,
        }
    }
}
