//! The closed set of page kinds served from the route space.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A page kind determines which loader and which renderer apply to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Landing page with several content sections.
    Home,
    /// Seasonal campaign landing page.
    BlackFriday,
    /// Movie hub (now showing, coming soon).
    Movies,
    /// A single event.
    Event,
    /// A single sports match.
    Match,
    /// A single movie.
    Movie,
    /// A category hub, optionally scoped to a year.
    Category,
    /// A countdown to a fixed moment.
    Countdown,
    /// An embeddable widget rendered inside third-party pages.
    Embed,
    /// Fallback for every path no other rule claims.
    Generic,
}

impl PageKind {
    /// Every kind, in declaration order.
    pub const ALL: [PageKind; 10] = [
        PageKind::Home,
        PageKind::BlackFriday,
        PageKind::Movies,
        PageKind::Event,
        PageKind::Match,
        PageKind::Movie,
        PageKind::Category,
        PageKind::Countdown,
        PageKind::Embed,
        PageKind::Generic,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::BlackFriday => "black_friday",
            PageKind::Movies => "movies",
            PageKind::Event => "event",
            PageKind::Match => "match",
            PageKind::Movie => "movie",
            PageKind::Category => "category",
            PageKind::Countdown => "countdown",
            PageKind::Embed => "embed",
            PageKind::Generic => "generic",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
