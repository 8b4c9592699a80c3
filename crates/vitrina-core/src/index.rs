//! Indexability decision.
//!
//! A page is indexable only when its snapshot was available at render time.
//! [`IndexPolicy`] layers static deny-lists (kinds and path prefixes) on top.

use serde::{Deserialize, Serialize};

use crate::kind::PageKind;
use crate::route::RouteMatch;

/// Where a page view's snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Read from the payload embedded by the prerender pass.
    Embedded,
    /// A lazy load is in flight.
    Loading,
    /// A lazy (or server) load finished with content.
    Loaded,
    /// The load finished without content.
    Absent,
}

impl LoadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadStatus::Embedded => "embedded",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Absent => "absent",
        }
    }
}

/// True only for a settled load that produced content.
pub fn should_index(status: LoadStatus, snapshot_present: bool) -> bool {
    snapshot_present && matches!(status, LoadStatus::Embedded | LoadStatus::Loaded)
}

/// Robots directive emitted in `<meta name="robots">` and `X-Robots-Tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotsDirective {
    Index,
    NoIndex,
}

impl RobotsDirective {
    pub fn from_indexable(indexable: bool) -> Self {
        if indexable {
            RobotsDirective::Index
        } else {
            RobotsDirective::NoIndex
        }
    }

    /// Value for the meta tag and header.
    pub fn as_str(self) -> &'static str {
        match self {
            RobotsDirective::Index => "index, follow",
            RobotsDirective::NoIndex => "noindex",
        }
    }

    pub fn is_index(self) -> bool {
        self == RobotsDirective::Index
    }
}

/// Kinds that are never indexed.
pub const NEVER_INDEXED_KINDS: &[PageKind] = &[PageKind::Embed];

/// Path prefixes that are never indexed unless configured otherwise.
pub const DEFAULT_NOINDEX_PREFIXES: &[&str] = &["/cont", "/admin", "/cautare", "/_snapshot"];

/// Static deny-lists applied on top of [`should_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPolicy {
    kinds: Vec<PageKind>,
    prefixes: Vec<String>,
}

impl Default for IndexPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPolicy {
    /// Policy with the default kind and prefix deny-lists.
    pub fn new() -> Self {
        Self {
            kinds: NEVER_INDEXED_KINDS.to_vec(),
            prefixes: DEFAULT_NOINDEX_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Replace the prefix deny-list. Prefixes are trimmed, given a leading
    /// `/` and stripped of trailing ones; blanks are skipped.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.prefixes = prefixes
            .into_iter()
            .filter_map(|prefix| {
                let trimmed = prefix.as_ref().trim().trim_matches('/');
                (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
            })
            .collect();
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn kinds(&self) -> &[PageKind] {
        &self.kinds
    }

    /// Whether the route is excluded regardless of content. Prefixes match
    /// whole segments: `/cont` denies `/cont/setari` but not `/contact`.
    pub fn is_denied(&self, route: &RouteMatch) -> bool {
        self.kinds.contains(&route.kind) || self.is_denied_path(&route.pathname)
    }

    pub fn is_denied_path(&self, pathname: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            pathname
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Full decision for one page view.
    pub fn should_index(
        &self,
        route: &RouteMatch,
        status: LoadStatus,
        snapshot_present: bool,
    ) -> bool {
        !self.is_denied(route) && should_index(status, snapshot_present)
    }

    pub fn directive(
        &self,
        route: &RouteMatch,
        status: LoadStatus,
        snapshot_present: bool,
    ) -> RobotsDirective {
        RobotsDirective::from_indexable(self.should_index(route, status, snapshot_present))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTable;

    fn route(path: &str) -> RouteMatch {
        RouteTable::shared().resolve(path)
    }

    #[test]
    fn only_settled_loads_with_content_index() {
        assert!(should_index(LoadStatus::Embedded, true));
        assert!(should_index(LoadStatus::Loaded, true));
        assert!(!should_index(LoadStatus::Embedded, false));
        assert!(!should_index(LoadStatus::Loaded, false));
        assert!(!should_index(LoadStatus::Loading, true));
        assert!(!should_index(LoadStatus::Absent, true));
        assert!(!should_index(LoadStatus::Absent, false));
    }

    #[test]
    fn embeds_are_never_indexed() {
        let policy = IndexPolicy::default();
        let embed = route("/embed/abc123");
        assert!(policy.is_denied(&embed));
        assert!(!policy.should_index(&embed, LoadStatus::Loaded, true));
        assert_eq!(
            policy.directive(&embed, LoadStatus::Embedded, true),
            RobotsDirective::NoIndex
        );
    }

    #[test]
    fn loaded_event_is_indexed() {
        let policy = IndexPolicy::default();
        let event = route("/evenimente/untold-2025");
        assert!(policy.should_index(&event, LoadStatus::Loaded, true));
        assert_eq!(
            policy.directive(&event, LoadStatus::Loaded, true).as_str(),
            "index, follow"
        );
    }

    #[test]
    fn prefixes_match_whole_segments() {
        let policy = IndexPolicy::default();
        assert!(policy.is_denied_path("/cont"));
        assert!(policy.is_denied_path("/cont/setari"));
        assert!(policy.is_denied_path("/cautare/untold"));
        assert!(!policy.is_denied_path("/contact"));
        assert!(!policy.is_denied_path("/"));
        assert!(!policy.should_index(&route("/admin/pagini"), LoadStatus::Loaded, true));
    }

    #[test]
    fn configured_prefixes_replace_defaults() {
        let policy = IndexPolicy::new().with_prefixes([" privat/ ", "", "/intern"]);
        assert_eq!(policy.prefixes(), ["/privat", "/intern"]);
        assert!(policy.is_denied_path("/privat/x"));
        assert!(!policy.is_denied_path("/admin"));
        assert!(policy.is_denied(&route("/embed/x")));
    }

    #[test]
    fn status_labels() {
        assert_eq!(LoadStatus::Embedded.as_str(), "embedded");
        assert_eq!(
            serde_json::to_string(&LoadStatus::Absent).unwrap(),
            "\"absent\""
        );
    }
}
