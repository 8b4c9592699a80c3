//! Path classification: normalize a pathname and map it to exactly one
//! [`PageKind`] plus the parameters extracted from it.
//!
//! Rules are evaluated in a fixed order and the first hit wins. Literal paths
//! come first, then patterns from most to least specific. A path no rule
//! claims resolves to [`PageKind::Generic`] with empty params, so resolution
//! never fails.
//!
//! ```text
//! /                          -> home
//! /filme                     -> movies
//! /black-friday              -> black_friday
//! /evenimente/{slug}         -> event
//! /sport/{id}                -> match
//! /filme/{id}                -> movie
//! /categorii/{slug}/{year}   -> category (year is a number)
//! /categorii/{slug}          -> category
//! /c/{id}                    -> countdown
//! /embed/{id}                -> embed
//! anything else              -> generic
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::kind::PageKind;

/// A single extracted path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric segment (only produced for segments a rule parses as numbers).
    Number(i64),
    /// Raw, percent-decoded segment text.
    Text(String),
}

/// Parameters extracted from a path, keyed by name (`slug`, `id`, `year`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a text parameter.
    pub fn with_text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), ParamValue::Text(value.into()));
        self
    }

    /// Builder-style insert of a numeric parameter.
    pub fn with_number(mut self, key: &str, value: i64) -> Self {
        self.0.insert(key.to_string(), ParamValue::Number(value));
        self
    }

    /// Look up a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Text value of a parameter, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParamValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Numeric value of a parameter, if present and numeric.
    pub fn number(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(ParamValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extracts params from the captures of a pattern rule.
pub type ParamExtractor = fn(&Captures<'_>) -> Params;

/// How a descriptor recognizes a pathname.
#[derive(Debug)]
pub enum RoutePattern {
    /// Exact match against the normalized pathname. Produces no params.
    Literal(&'static str),
    /// Anchored regular expression plus its param extractor.
    Pattern {
        /// Compiled expression, matched against the whole pathname.
        regex: Regex,
        /// Turns captures into params.
        extract: ParamExtractor,
    },
}

/// One rule of the route table.
#[derive(Debug)]
pub struct RouteDescriptor {
    pattern: RoutePattern,
    kind: PageKind,
}

impl RouteDescriptor {
    /// A rule matching exactly one normalized pathname.
    pub fn literal(path: &'static str, kind: PageKind) -> Self {
        Self {
            pattern: RoutePattern::Literal(path),
            kind,
        }
    }

    /// A rule matching a regular expression. The expression should be
    /// anchored with `^...$`.
    pub fn pattern(
        expression: &str,
        kind: PageKind,
        extract: ParamExtractor,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: RoutePattern::Pattern {
                regex: Regex::new(expression)?,
                extract,
            },
            kind,
        })
    }

    /// Kind this rule resolves to.
    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// The rule's pattern.
    pub fn route_pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Test a normalized pathname, returning the extracted params on a hit.
    pub fn test(&self, pathname: &str) -> Option<Params> {
        match &self.pattern {
            RoutePattern::Literal(path) => (*path == pathname).then(Params::new),
            RoutePattern::Pattern { regex, extract } => {
                regex.captures(pathname).map(|caps| extract(&caps))
            }
        }
    }
}

/// Result of classifying a pathname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    /// The normalized pathname that was matched.
    pub pathname: String,
    /// The page kind the path belongs to.
    pub kind: PageKind,
    /// Params extracted by the matching rule.
    pub params: Params,
}

/// Ordered list of route descriptors.
#[derive(Debug)]
pub struct RouteTable {
    descriptors: Vec<RouteDescriptor>,
}

static SITE_ROUTES: LazyLock<Arc<RouteTable>> = LazyLock::new(|| Arc::new(RouteTable::site()));

impl RouteTable {
    /// Build a table from descriptors, evaluated in the given order.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The site's route table.
    pub fn site() -> Self {
        Self::new(vec![
            RouteDescriptor::literal("/", PageKind::Home),
            RouteDescriptor::literal("/filme", PageKind::Movies),
            RouteDescriptor::literal("/black-friday", PageKind::BlackFriday),
            rule(r"^/evenimente/([^/]+)$", PageKind::Event, |caps| {
                Params::new().with_text("slug", &caps[1])
            }),
            rule(r"^/sport/([^/]+)$", PageKind::Match, |caps| {
                Params::new().with_text("id", &caps[1])
            }),
            rule(r"^/filme/([^/]+)$", PageKind::Movie, |caps| {
                Params::new().with_text("id", &caps[1])
            }),
            rule(r"^/categorii/([^/]+)/([0-9]{4})$", PageKind::Category, |caps| {
                let params = Params::new().with_text("slug", &caps[1]);
                match caps[2].parse::<i64>() {
                    Ok(year) => params.with_number("year", year),
                    Err(_) => params,
                }
            }),
            rule(r"^/categorii/([^/]+)$", PageKind::Category, |caps| {
                Params::new().with_text("slug", &caps[1])
            }),
            rule(r"^/c/([^/]+)$", PageKind::Countdown, |caps| {
                Params::new().with_text("id", &caps[1])
            }),
            rule(r"^/embed/([^/]+)$", PageKind::Embed, |caps| {
                Params::new().with_text("id", &caps[1])
            }),
        ])
    }

    /// Shared handle to the site's route table. Server and client resolve
    /// through the same instance.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SITE_ROUTES)
    }

    /// Descriptors in evaluation order.
    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.descriptors
    }

    /// Normalize `input` and classify it. Never fails: paths no rule claims
    /// resolve to [`PageKind::Generic`] with empty params.
    ///
    /// `input` is a raw URL or path. Normalization is not idempotent for
    /// `%25` escapes, so pass what the request or browser reported, never
    /// an already-normalized pathname.
    pub fn resolve(&self, input: &str) -> RouteMatch {
        let pathname = normalize_pathname(input);

        let (kind, params) = self
            .descriptors
            .iter()
            .find_map(|descriptor| descriptor.test(&pathname).map(|p| (descriptor.kind, p)))
            .unwrap_or((PageKind::Generic, Params::new()));

        RouteMatch {
            pathname,
            kind,
            params,
        }
    }
}

fn rule(expression: &str, kind: PageKind, extract: ParamExtractor) -> RouteDescriptor {
    RouteDescriptor::pattern(expression, kind, extract)
        .unwrap_or_else(|err| panic!("route pattern {expression} does not compile: {err}"))
}

/// Reduce a URL or raw path to its canonical pathname.
///
/// - absolute URLs keep only their path
/// - query string and fragment are dropped
/// - every segment is percent-decoded (lossy on invalid UTF-8)
/// - empty segments are dropped, which removes trailing and repeated slashes
///
/// The result always starts with `/` and never ends with one unless it is
/// the root.
pub fn normalize_pathname(input: &str) -> String {
    let trimmed = input.trim();

    let raw_path = match Url::parse(trimmed) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => {
            let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
            trimmed[..end].to_string()
        }
    };

    let segments: Vec<String> = raw_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();

    format!("/{}", segments.join("/"))
}
