//! Loader dispatch: one async loader per [`PageKind`].
//!
//! Loaders read from the content repository and decode records into typed
//! content. Every failure mode (missing record, malformed params, malformed
//! record, unavailable backend) becomes a not-found snapshot, so callers
//! always get a [`ContentSnapshot`] back.
//!
//! The dispatch is an exhaustive `match` on the kind: adding a kind without
//! a loader does not compile.

use serde::de::DeserializeOwned;

use crate::error::{LoadFailure, RepositoryError};
use crate::kind::PageKind;
use crate::repository::{Collection, ContentRepository, RecordKey};
use crate::route::{Params, RouteMatch};
use crate::snapshot::{
    CategoryContent, ContentSnapshot, CountdownContent, EmbedContent, EventContent, GenericPage,
    HomeContent, ListingItem, MatchContent, MovieContent, MoviesContent, PageContent, Section,
};

/// Campaign record read by the Black Friday page.
pub const BLACK_FRIDAY_CAMPAIGN: &str = "black-friday";

/// Longest accepted slug or id.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Years accepted by category routes.
pub const CATEGORY_YEARS: std::ops::RangeInclusive<i64> = 1900..=2100;

/// Maps a resolved route to its loader and runs it against the repository.
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    repository: R,
}

impl<R: ContentRepository> Dispatcher<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Run the loader for `route.kind`. Never fails.
    pub async fn load(&self, route: &RouteMatch) -> ContentSnapshot {
        let kind = route.kind;

        match self.dispatch(route).await {
            Ok(content) => {
                debug_assert_eq!(content.kind(), kind);
                tracing::debug!(kind = %kind, pathname = %route.pathname, "content loaded");
                ContentSnapshot::found(content)
            }
            Err(failure) => {
                tracing::debug!(
                    kind = %kind,
                    pathname = %route.pathname,
                    reason = failure.as_str(),
                    "content not available"
                );
                metrics::counter!(
                    "vitrina_loader_failures_total",
                    "kind" => kind.as_str(),
                    "reason" => failure.as_str()
                )
                .increment(1);
                ContentSnapshot::not_found(kind)
            }
        }
    }

    async fn dispatch(&self, route: &RouteMatch) -> Result<PageContent, LoadFailure> {
        let params = &route.params;

        match route.kind {
            PageKind::Home => Ok(PageContent::Home(self.load_home().await)),
            PageKind::BlackFriday => self
                .fetch(RecordKey::new(Collection::Campaigns, BLACK_FRIDAY_CAMPAIGN))
                .await
                .map(PageContent::BlackFriday),
            PageKind::Movies => Ok(PageContent::Movies(self.load_movies().await)),
            PageKind::Event => {
                let slug = identifier(params, "slug")?;
                let mut event: EventContent =
                    self.fetch(RecordKey::new(Collection::Events, slug)).await?;
                event.slug = slug.to_string();
                Ok(PageContent::Event(event))
            }
            PageKind::Match => {
                let id = identifier(params, "id")?;
                let mut fixture: MatchContent =
                    self.fetch(RecordKey::new(Collection::Matches, id)).await?;
                fixture.id = id.to_string();
                Ok(PageContent::Match(fixture))
            }
            PageKind::Movie => {
                let id = identifier(params, "id")?;
                let mut movie: MovieContent =
                    self.fetch(RecordKey::new(Collection::Movies, id)).await?;
                movie.id = id.to_string();
                Ok(PageContent::Movie(movie))
            }
            PageKind::Category => self.load_category(params).await.map(PageContent::Category),
            PageKind::Countdown => {
                let id = identifier(params, "id")?;
                let mut countdown: CountdownContent =
                    self.fetch(RecordKey::new(Collection::Countdowns, id)).await?;
                countdown.id = id.to_string();
                Ok(PageContent::Countdown(countdown))
            }
            PageKind::Embed => {
                let id = identifier(params, "id")?;
                let mut embed: EmbedContent =
                    self.fetch(RecordKey::new(Collection::Embeds, id)).await?;
                embed.id = id.to_string();
                Ok(PageContent::Embed(embed))
            }
            PageKind::Generic => {
                let mut page: GenericPage = self
                    .fetch(RecordKey::new(Collection::Pages, route.pathname.as_str()))
                    .await?;
                page.path = route.pathname.clone();
                Ok(PageContent::Generic(page))
            }
        }
    }

    async fn load_category(&self, params: &Params) -> Result<CategoryContent, LoadFailure> {
        let slug = identifier(params, "slug")?;
        let year = match params.get("year") {
            None => None,
            Some(_) => {
                let year = params.number("year").ok_or(LoadFailure::MalformedParams)?;
                if !CATEGORY_YEARS.contains(&year) {
                    return Err(LoadFailure::MalformedParams);
                }
                Some(year)
            }
        };

        let key = match year {
            Some(year) => format!("{slug}/{year}"),
            None => slug.to_string(),
        };

        let mut category: CategoryContent =
            self.fetch(RecordKey::new(Collection::Categories, key)).await?;
        category.slug = slug.to_string();
        category.year = year.and_then(|y| i32::try_from(y).ok());
        Ok(category)
    }

    /// Home fans out to four section reads. Failed or missing sections are
    /// left empty and listed in `empty_sections`; the page resolves even
    /// when all of them are.
    async fn load_home(&self) -> HomeContent {
        let (featured_events, upcoming_matches, new_movies, categories) = futures::join!(
            self.section(Section::FeaturedEvents),
            self.section(Section::UpcomingMatches),
            self.section(Section::NewMovies),
            self.section(Section::Categories),
        );

        let empty_sections = empty_sections(&[
            (Section::FeaturedEvents, &featured_events),
            (Section::UpcomingMatches, &upcoming_matches),
            (Section::NewMovies, &new_movies),
            (Section::Categories, &categories),
        ]);
        if empty_sections.len() == 4 {
            tracing::warn!(kind = "home", "every section is empty");
        }

        HomeContent {
            featured_events,
            upcoming_matches,
            new_movies,
            categories,
            empty_sections,
        }
    }

    async fn load_movies(&self) -> MoviesContent {
        let (now_showing, coming_soon) = futures::join!(
            self.section(Section::NowShowing),
            self.section(Section::ComingSoon),
        );

        let empty_sections = empty_sections(&[
            (Section::NowShowing, &now_showing),
            (Section::ComingSoon, &coming_soon),
        ]);
        if empty_sections.len() == 2 {
            tracing::warn!(kind = "movies", "every section is empty");
        }

        MoviesContent {
            now_showing,
            coming_soon,
            empty_sections,
        }
    }

    async fn section(&self, section: Section) -> Vec<ListingItem> {
        self.fetch(RecordKey::new(Collection::Sections, section.key()))
            .await
            .unwrap_or_default()
    }

    async fn fetch<T: DeserializeOwned>(&self, key: RecordKey) -> Result<T, LoadFailure> {
        match self.repository.read(&key).await {
            Ok(Some(body)) => serde_json::from_value(body).map_err(|err| {
                tracing::warn!(record = %key, error = %err, "record does not match its content shape");
                LoadFailure::MalformedRecord
            }),
            Ok(None) => Err(LoadFailure::NotFound),
            Err(RepositoryError::InvalidBody(err)) => {
                tracing::warn!(record = %key, error = %err, "stored record is not valid JSON");
                Err(LoadFailure::MalformedRecord)
            }
            Err(err) => {
                tracing::warn!(record = %key, error = %err, "repository read failed");
                Err(LoadFailure::RepositoryUnavailable)
            }
        }
    }
}

fn empty_sections(sections: &[(Section, &Vec<ListingItem>)]) -> Vec<Section> {
    sections
        .iter()
        .filter(|(_, items)| items.is_empty())
        .map(|(section, _)| *section)
        .collect()
}

/// Fetch a slug/id param and check its shape.
fn identifier<'a>(params: &'a Params, name: &str) -> Result<&'a str, LoadFailure> {
    let value = params.text(name).ok_or(LoadFailure::MalformedParams)?;
    if is_identifier(value) {
        Ok(value)
    } else {
        Err(LoadFailure::MalformedParams)
    }
}

/// Slugs and ids: 1..=128 chars of letters, digits, `-`, `_` or `.`, not
/// starting with a dot.
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && !value.starts_with('.')
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
